// ============================================
// Safe Codec - Переносимая (де)сериализация
// ============================================
// Пишет каждое поле отдельно через bincode (fixint, little-endian).
// При чтении bounding box не копируется, а пересобирается через add_vertex.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use ultraviolet::Vec3;

use super::config::CodecConfig;
use super::error::{MeshCodecError, Result};
use crate::section::{BoundingBox, MeshSection, Vertex};

/// Безопасный кодек секции
pub struct SafeCodec;

impl SafeCodec {
    /// Записать секцию в поток
    pub fn encode<W: Write>(section: &MeshSection, mut writer: W) -> Result<()> {
        let bounds = section.bounding_box();
        let min = bounds.min();
        let max = bounds.max();

        write_count(&mut writer, section.vertex_count(), "vertex count")?;
        write_field(&mut writer, &[min.x, min.y, min.z], "bounds")?;
        write_field(&mut writer, &[max.x, max.y, max.z], "bounds")?;

        for vertex in section.vertices() {
            write_field(&mut writer, vertex, "vertex")?;
        }

        write_count(&mut writer, section.index_count(), "index count")?;
        for index in section.indices() {
            write_field(&mut writer, index, "index")?;
        }

        log::debug!(
            "Encoded section: {} vertices, {} indices",
            section.vertex_count(),
            section.index_count()
        );
        Ok(())
    }

    /// Записать секцию в новый буфер
    pub fn encode_to_vec(section: &MeshSection) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(super::encoded_len(section));
        Self::encode(section, &mut buffer)?;
        Ok(buffer)
    }

    /// Прочитать секцию из потока.
    /// При любой ошибке секция не возвращается (частичных результатов нет).
    pub fn decode<R: Read>(mut reader: R, config: &CodecConfig) -> Result<MeshSection> {
        let result = Self::decode_inner(&mut reader, config);
        if let Err(e) = &result {
            log::warn!("Failed to decode mesh section: {}", e);
        }
        result
    }

    fn decode_inner<R: Read>(reader: &mut R, config: &CodecConfig) -> Result<MeshSection> {
        let vertex_num = read_count(reader, "vertex count")?;

        let min: [f32; 3] = read_field(reader, "bounds")?;
        let max: [f32; 3] = read_field(reader, "bounds")?;
        let stored_bounds = BoundingBox::from_corners(Vec3::from(min), Vec3::from(max));

        let mut section = MeshSection::with_capacity(vertex_num.min(config.max_reserve), 0);
        for _ in 0..vertex_num {
            let vertex: Vertex = read_field(reader, "vertex")?;
            section.add_vertex(vertex);
        }

        let index_num = read_count(reader, "index count")?;
        for _ in 0..index_num {
            let index: i32 = read_field(reader, "index")?;
            section.add_index(index);
        }

        if config.validate_indices {
            if let Some((position, index)) = section.validate_indices() {
                return Err(MeshCodecError::IndexOutOfRange {
                    position,
                    index,
                    vertex_count: section.vertex_count(),
                });
            }
        }

        if vertex_num > 0 && stored_bounds != *section.bounding_box() {
            log::warn!(
                "Stored bounds {:?}..{:?} do not match vertices, rebuilt as {:?}..{:?}",
                min,
                max,
                section.bounding_box().min(),
                section.bounding_box().max()
            );
        }

        log::debug!("Decoded section: {} vertices, {} indices", vertex_num, index_num);
        Ok(section)
    }
}

fn write_field<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T, field: &'static str) -> Result<()> {
    bincode::serialize_into(writer, value).map_err(|e| MeshCodecError::from_bincode(e, field))
}

fn write_count<W: Write>(writer: &mut W, count: usize, field: &'static str) -> Result<()> {
    let count = super::wire_count(count, field)?;
    write_field(writer, &count, field)
}

fn read_field<R: Read, T: DeserializeOwned>(reader: &mut R, field: &'static str) -> Result<T> {
    bincode::deserialize_from(reader).map_err(|e| MeshCodecError::from_bincode(e, field))
}

fn read_count<R: Read>(reader: &mut R, field: &'static str) -> Result<usize> {
    let count: i32 = read_field(reader, field)?;
    if count < 0 {
        return Err(MeshCodecError::InvalidCount { field, count: count as i64 });
    }
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoded_len;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sample_section() -> MeshSection {
        let mut section = MeshSection::new();
        section.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], 0));
        section.add_vertex(Vertex::new([-1.0, 5.0, 0.0], [0.0, 1.0, 0.0], 1));
        section.add_vertex(Vertex::new([0.0, 0.0, -2.0], [1.0, 0.0, 0.0], 2));
        section.add_triangle(0, 1, 2);
        section
    }

    #[test]
    fn test_roundtrip() {
        init_logger();
        let section = sample_section();
        let bytes = SafeCodec::encode_to_vec(&section).unwrap();
        assert_eq!(bytes.len(), encoded_len(&section));

        let decoded = SafeCodec::decode(&bytes[..], &CodecConfig::default()).unwrap();
        assert_eq!(decoded, section);
        assert_eq!(decoded.bounding_box().min(), Vec3::new(-1.0, 0.0, -2.0));
    }

    #[test]
    fn test_roundtrip_empty() {
        let bytes = SafeCodec::encode_to_vec(&MeshSection::new()).unwrap();
        assert_eq!(bytes.len(), 4 + 24 + 4);
        assert!(bytes.iter().all(|&b| b == 0));

        let decoded = SafeCodec::decode(&bytes[..], &CodecConfig::default()).unwrap();
        assert!(decoded.is_empty());
        assert!(!decoded.bounding_box().is_valid());
    }

    #[test]
    fn test_field_order_on_wire() {
        let mut section = MeshSection::new();
        section.add_vertex(Vertex::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], 9));
        section.add_index(0);
        let bytes = SafeCodec::encode_to_vec(&section).unwrap();

        let f = |offset: usize| f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let i = |offset: usize| i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());

        assert_eq!(i(0), 1);
        // min перед max
        assert_eq!([f(4), f(8), f(12)], [1.0, 2.0, 3.0]);
        assert_eq!([f(16), f(20), f(24)], [1.0, 2.0, 3.0]);
        assert_eq!([f(28), f(32), f(36), f(40), f(44), f(48)], [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(i(52), 9);
        assert_eq!(i(56), 1);
        assert_eq!(i(60), 0);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_truncated_before_last_material_index() {
        init_logger();
        let mut section = MeshSection::new();
        section.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 3));
        section.add_vertex(Vertex::new([1.0, 1.0, 1.0], [0.0, 1.0, 0.0], 4));
        let bytes = SafeCodec::encode_to_vec(&section).unwrap();

        // Обрезаем перед material_index второй вершины
        let cut = 4 + 24 + 28 + 24;
        let result = SafeCodec::decode(&bytes[..cut], &CodecConfig::default());
        assert!(matches!(result, Err(MeshCodecError::TruncatedInput { field: "vertex" })));
    }

    #[test]
    fn test_truncated_in_indices() {
        let bytes = SafeCodec::encode_to_vec(&sample_section()).unwrap();
        let result = SafeCodec::decode(&bytes[..bytes.len() - 2], &CodecConfig::default());
        assert!(matches!(result, Err(MeshCodecError::TruncatedInput { field: "index" })));
    }

    #[test]
    fn test_negative_count() {
        let mut bytes = SafeCodec::encode_to_vec(&sample_section()).unwrap();
        bytes[0..4].copy_from_slice(&(-5i32).to_le_bytes());
        let result = SafeCodec::decode(&bytes[..], &CodecConfig::default());
        assert!(matches!(
            result,
            Err(MeshCodecError::InvalidCount { field: "vertex count", count: -5 })
        ));
    }

    #[test]
    fn test_negative_index_count() {
        let section = sample_section();
        let mut bytes = SafeCodec::encode_to_vec(&section).unwrap();
        let offset = 4 + 24 + 28 * section.vertex_count();
        bytes[offset..offset + 4].copy_from_slice(&(-2i32).to_le_bytes());

        let result = SafeCodec::decode(&bytes[..], &CodecConfig::default());
        assert!(matches!(
            result,
            Err(MeshCodecError::InvalidCount { field: "index count", count: -2 })
        ));
    }

    #[test]
    fn test_huge_count_fails_as_truncated() {
        let mut bytes = SafeCodec::encode_to_vec(&sample_section()).unwrap();
        bytes[0..4].copy_from_slice(&i32::MAX.to_le_bytes());
        let result = SafeCodec::decode(&bytes[..], &CodecConfig::default());
        assert!(matches!(result, Err(MeshCodecError::TruncatedInput { .. })));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut section = sample_section();
        section.add_triangle(0, 2, 3);
        let bytes = SafeCodec::encode_to_vec(&section).unwrap();

        let result = SafeCodec::decode(&bytes[..], &CodecConfig::strict());
        assert!(matches!(
            result,
            Err(MeshCodecError::IndexOutOfRange { position: 5, index: 3, vertex_count: 3 })
        ));

        // legacy режим принимает индекс как есть
        let decoded = SafeCodec::decode(&bytes[..], &CodecConfig::legacy()).unwrap();
        assert_eq!(decoded.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_negative_index_rejected() {
        let mut section = MeshSection::new();
        section.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0));
        section.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0));
        section.add_vertex(Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], 0));
        section.add_triangle(0, -1, 2);
        let bytes = SafeCodec::encode_to_vec(&section).unwrap();

        let result = SafeCodec::decode(&bytes[..], &CodecConfig::strict());
        assert!(matches!(
            result,
            Err(MeshCodecError::IndexOutOfRange { position: 1, index: -1, vertex_count: 3 })
        ));
    }

    #[test]
    fn test_stored_bounds_are_rebuilt() {
        init_logger();
        let section = sample_section();
        let mut bytes = SafeCodec::encode_to_vec(&section).unwrap();
        for offset in (4..28).step_by(4) {
            bytes[offset..offset + 4].copy_from_slice(&100.0f32.to_le_bytes());
        }

        let decoded = SafeCodec::decode(&bytes[..], &CodecConfig::default()).unwrap();
        assert_eq!(decoded.bounding_box(), section.bounding_box());
    }

    #[test]
    fn test_reset_section_encodes_like_fresh() {
        let mut section = sample_section();
        section.reset();
        section.add_vertex(Vertex::new([2.0, 2.0, 2.0], [0.0, 1.0, 0.0], 0));

        let mut fresh = MeshSection::new();
        fresh.add_vertex(Vertex::new([2.0, 2.0, 2.0], [0.0, 1.0, 0.0], 0));

        assert_eq!(
            SafeCodec::encode_to_vec(&section).unwrap(),
            SafeCodec::encode_to_vec(&fresh).unwrap()
        );
    }
}
