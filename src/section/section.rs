// ============================================
// Mesh Section - Одна секция процедурного меша
// ============================================
// Каждый материал имеет свою секцию.

use super::bounds::BoundingBox;
use super::vertex::Vertex;

/// Секция меша: буфер вершин, буфер индексов, локальный bounding box
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSection {
    vertices: Vec<Vertex>,
    indices: Vec<i32>,
    bounds: BoundingBox,
}

impl MeshSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
            bounds: BoundingBox::empty(),
        }
    }

    /// Собрать секцию из готовых буферов (бокс не пересчитывается)
    pub(crate) fn from_raw_parts(vertices: Vec<Vertex>, indices: Vec<i32>, bounds: BoundingBox) -> Self {
        Self { vertices, indices, bounds }
    }

    /// Очистить секцию для переиспользования (память буферов сохраняется)
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.bounds = BoundingBox::empty();
    }

    /// Добавить вершину и расширить бокс
    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.bounds.add_point(vertex.position_vec());
        self.vertices.push(vertex);
    }

    /// Добавить индекс (без проверки диапазона)
    #[inline]
    pub fn add_index(&mut self, index: i32) {
        self.indices.push(index);
    }

    pub fn add_triangle(&mut self, a: i32, b: i32, c: i32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Первый индекс вне [0, vertex_count): (позиция в буфере, значение)
    pub fn validate_indices(&self) -> Option<(usize, i32)> {
        let vertex_count = self.vertices.len();
        self.indices
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, index)| index < 0 || index as usize >= vertex_count)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }
}
