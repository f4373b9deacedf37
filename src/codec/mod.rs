// ============================================
// Codec Module - Бинарный формат секции
// ============================================
// Формат (все скаляры фиксированной ширины, без паддинга):
//   i32 vertex_count
//   f32 x6 min.xyz, max.xyz
//   (f32 x6, i32) x vertex_count   position.xyz, normal.xyz, material_index
//   i32 index_count
//   i32 x index_count
//
// SafeCodec - поле за полем, переносимый (little-endian).
// FastCodec - bulk copy, layout должен совпадать с памятью (unsafe).

mod config;
mod error;
mod fast;
mod safe;

pub use config::CodecConfig;
pub use error::{MeshCodecError, Result};
pub use fast::{FastCodec, FastUnsafeDeserializer};
pub use safe::SafeCodec;

use crate::section::{MeshSection, VERTEX_SIZE};

/// Размер счётчика (i32)
pub const COUNT_SIZE: usize = std::mem::size_of::<i32>();

/// Размер индекса (i32)
pub const INDEX_SIZE: usize = std::mem::size_of::<i32>();

/// Размер bounding box на диске (6x f32)
pub const BOUNDS_SIZE: usize = 6 * std::mem::size_of::<f32>();

/// Точный размер закодированной секции (одинаков для обоих путей)
pub fn encoded_len(section: &MeshSection) -> usize {
    COUNT_SIZE
        + BOUNDS_SIZE
        + section.vertex_count() * VERTEX_SIZE
        + COUNT_SIZE
        + section.index_count() * INDEX_SIZE
}

/// Счётчик буфера -> i32 на диске. Больше i32::MAX не записывается.
pub(crate) fn wire_count(count: usize, field: &'static str) -> Result<i32> {
    i32::try_from(count).map_err(|_| MeshCodecError::InvalidCount {
        field,
        count: count as i64,
    })
}
