// ============================================
// Codec Errors - Ошибки (де)сериализации
// ============================================

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshCodecError>;

/// Ошибки безопасного кодека.
/// Быстрый путь ошибок не возвращает: нарушение контракта там = UB.
#[derive(Error, Debug)]
pub enum MeshCodecError {
    #[error("Input ended while reading {field}")]
    TruncatedInput { field: &'static str },
    #[error("Invalid {field}: {count}")]
    InvalidCount { field: &'static str, count: i64 },
    #[error("Index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { position: usize, index: i32, vertex_count: usize },
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    #[error("Serialization failed: {0}")]
    Serialize(String),
    #[error("Section {slot}: {source}")]
    Section {
        slot: usize,
        #[source]
        source: Box<MeshCodecError>,
    },
    #[error("Invalid codec config: {0}")]
    Config(String),
}

impl MeshCodecError {
    /// Ошибка bincode -> ошибка кодека. EOF означает обрезанный поток.
    pub(crate) fn from_bincode(err: bincode::Error, field: &'static str) -> Self {
        match *err {
            bincode::ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                MeshCodecError::TruncatedInput { field }
            }
            bincode::ErrorKind::Io(e) => MeshCodecError::Io(e),
            other => MeshCodecError::Serialize(other.to_string()),
        }
    }

    /// Исходная ошибка без обёртки Section
    pub fn root(&self) -> &MeshCodecError {
        match self {
            MeshCodecError::Section { source, .. } => source.root(),
            other => other,
        }
    }
}
