// ============================================
// Mesh Vertex - Структура вершины секции
// ============================================
// Порядок полей = порядок на диске. Не переставлять:
// быстрый путь копирует буфер вершин как есть.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

/// Размер вершины в байтах (6x f32 + i32, без паддинга)
pub const VERTEX_SIZE: usize = std::mem::size_of::<Vertex>();

/// Вершина процедурного меша
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Индекс материала (слота секции)
    pub material_index: i32,
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], material_index: i32) -> Self {
        Self { position, normal, material_index }
    }

    /// Позиция как вектор (для bounding box)
    #[inline]
    pub fn position_vec(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// Касательная вершины.
/// Y касательная считается как cross(normal, tangent_x), флаг разворачивает её.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProcMeshTangent {
    pub tangent_x: [f32; 3],
    pub flip_tangent_y: bool,
}

impl ProcMeshTangent {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { tangent_x: [x, y, z], flip_tangent_y: false }
    }

    pub fn with_flip(tangent_x: [f32; 3], flip_tangent_y: bool) -> Self {
        Self { tangent_x, flip_tangent_y }
    }
}

impl Default for ProcMeshTangent {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_has_no_padding() {
        assert_eq!(VERTEX_SIZE, 28);
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
    }

    #[test]
    fn test_vertex_bytes_follow_field_order() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], 7);
        let bytes = bytemuck::bytes_of(&v);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[16..20], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[24..28], &7i32.to_ne_bytes());
    }

    #[test]
    fn test_default_tangent() {
        let t = ProcMeshTangent::default();
        assert_eq!(t.tangent_x, [1.0, 0.0, 0.0]);
        assert!(!t.flip_tangent_y);
        assert!(ProcMeshTangent::with_flip([0.0, 0.0, 1.0], true).flip_tangent_y);
    }
}
