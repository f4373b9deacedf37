// ============================================
// Proc Mesh - Набор секций (по одной на материал)
// ============================================
// Секции (де)сериализуются независимо, поэтому батчи идут через rayon.

use rayon::prelude::*;

use crate::codec::{CodecConfig, MeshCodecError, Result, SafeCodec};
use crate::section::{BoundingBox, MeshSection};

/// Процедурный меш: секции по слотам материалов
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcMesh {
    sections: Vec<MeshSection>,
}

impl ProcMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить секцию, возвращает её слот
    pub fn add_section(&mut self, section: MeshSection) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    pub fn section(&self, slot: usize) -> Option<&MeshSection> {
        self.sections.get(slot)
    }

    pub fn section_mut(&mut self, slot: usize) -> Option<&mut MeshSection> {
        self.sections.get_mut(slot)
    }

    pub fn sections(&self) -> &[MeshSection] {
        &self.sections
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// Сбросить все секции (слоты остаются)
    pub fn clear(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }

    /// Общий бокс по всем непустым секциям
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        for section in &self.sections {
            bounds.union(section.bounding_box());
        }
        bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.sections.iter().map(MeshSection::vertex_count).sum()
    }

    /// Закодировать все секции параллельно (порядок слотов сохраняется)
    pub fn encode_sections(&self) -> Result<Vec<Vec<u8>>> {
        let buffers = self.sections
            .par_iter()
            .enumerate()
            .map(|(slot, section)| {
                SafeCodec::encode_to_vec(section).map_err(|e| MeshCodecError::Section {
                    slot,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Encoded {} mesh sections", buffers.len());
        Ok(buffers)
    }

    /// Декодировать буферы параллельно, по одному на слот.
    /// Ошибка любого буфера отменяет весь меш.
    pub fn decode_sections<B>(buffers: &[B], config: &CodecConfig) -> Result<Self>
    where
        B: AsRef<[u8]> + Sync,
    {
        let sections = buffers
            .par_iter()
            .enumerate()
            .map(|(slot, buffer)| {
                let bytes: &[u8] = buffer.as_ref();
                SafeCodec::decode(bytes, config).map_err(|e| MeshCodecError::Section {
                    slot,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Decoded {} mesh sections", sections.len());
        Ok(Self { sections })
    }
}
