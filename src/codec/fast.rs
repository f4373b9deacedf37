// ============================================
// Fast Codec - Быстрая (де)сериализация через bulk copy
// ============================================
// Буферы вершин и индексов копируются одним memcpy, без разбора полей.
//
// Контракт (проверяет вызывающий, не кодек):
// - буфер записан FastCodec::encode этой же версией на этой же платформе
//   (тот же layout Vertex, тот же порядок байт);
// - в буфере есть все байты, которые подразумевают оба счётчика.
// Нарушение контракта = чтение за пределами буфера (UB), а не ошибка.
//
// Bounding box берётся из буфера как есть (SafeCodec его пересобирает).

use bytemuck::{Pod, Zeroable};
use ultraviolet::Vec3;

use super::error::Result;
use crate::section::{BoundingBox, MeshSection, Vertex};

/// Курсор для чтения без проверки границ
pub struct FastUnsafeDeserializer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FastUnsafeDeserializer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Текущая позиция в байтах
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Сколько байт осталось (может быть 0 при выходе за границу)
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Прочитать одно значение.
    ///
    /// # Safety
    /// В буфере должно остаться не меньше `size_of::<T>()` байт.
    pub unsafe fn read_obj<T: Pod>(&mut self) -> T {
        let mut value = T::zeroed();
        // SAFETY: контракт передаётся вызывающему
        unsafe { self.read_into(std::slice::from_mut(&mut value)) };
        value
    }

    /// Заполнить `dst` байтами из буфера.
    ///
    /// # Safety
    /// В буфере должно остаться не меньше `size_of_val(dst)` байт.
    pub unsafe fn read_into<T: Pod>(&mut self, dst: &mut [T]) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(dst);
        // SAFETY: контракт передаётся вызывающему
        unsafe { copy_unchecked(self.data.as_ptr().add(self.pos), bytes) };
        self.pos += bytes.len();
    }
}

/// Единственное место с сырым копированием памяти.
///
/// # Safety
/// `src` должен указывать на `dst.len()` читаемых байт, не пересекающихся с `dst`.
#[inline]
unsafe fn copy_unchecked(src: *const u8, dst: &mut [u8]) {
    unsafe { std::ptr::copy_nonoverlapping(src, dst.as_mut_ptr(), dst.len()) };
}

/// Быстрый кодек секции
pub struct FastCodec;

impl FastCodec {
    /// Записать секцию в native layout (пара для decode_unchecked).
    /// Счётчики больше i32::MAX - InvalidCount, как в SafeCodec.
    pub fn encode(section: &MeshSection) -> Result<Vec<u8>> {
        let bounds = section.bounding_box();
        let min = bounds.min();
        let max = bounds.max();
        let vertex_num = super::wire_count(section.vertex_count(), "vertex count")?;
        let index_num = super::wire_count(section.index_count(), "index count")?;

        let mut buffer = Vec::with_capacity(super::encoded_len(section));
        buffer.extend_from_slice(bytemuck::bytes_of(&vertex_num));
        buffer.extend_from_slice(bytemuck::cast_slice(&[min.x, min.y, min.z]));
        buffer.extend_from_slice(bytemuck::cast_slice(&[max.x, max.y, max.z]));
        buffer.extend_from_slice(bytemuck::cast_slice(section.vertices()));
        buffer.extend_from_slice(bytemuck::bytes_of(&index_num));
        buffer.extend_from_slice(bytemuck::cast_slice(section.indices()));

        log::debug!("Fast-encoded section: {} bytes", buffer.len());
        Ok(buffer)
    }

    /// Прочитать секцию без проверок.
    /// Отрицательный счётчик читается как 0.
    ///
    /// # Safety
    /// Буфер курсора должен быть получен из `FastCodec::encode` на этой же
    /// платформе и содержать все байты, которые подразумевают счётчики.
    pub unsafe fn decode_unchecked(de: &mut FastUnsafeDeserializer<'_>) -> MeshSection {
        unsafe {
            let vertex_num: i32 = de.read_obj();

            let mut min = [0.0f32; 3];
            let mut max = [0.0f32; 3];
            de.read_into(&mut min);
            de.read_into(&mut max);

            let mut vertices = vec![Vertex::zeroed(); vertex_num.max(0) as usize];
            de.read_into(&mut vertices);

            let index_num: i32 = de.read_obj();
            let mut indices = vec![0i32; index_num.max(0) as usize];
            de.read_into(&mut indices);

            log::debug!("Fast-decoded section: {} vertices, {} indices", vertices.len(), indices.len());

            let bounds = BoundingBox::from_corners(Vec3::from(min), Vec3::from(max));
            MeshSection::from_raw_parts(vertices, indices, bounds)
        }
    }
}
