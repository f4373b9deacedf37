// ============================================
// Codec Config - Настройки безопасного декодера
// ============================================

use serde::{Deserialize, Serialize};

use super::error::{MeshCodecError, Result};

/// Конфигурация декодирования
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Проверять индексы на [0, vertex_count)
    pub validate_indices: bool,
    /// Максимум элементов, резервируемых заранее по счётчику из потока
    pub max_reserve: usize,
}

impl CodecConfig {
    /// Строгий режим: индексы проверяются
    pub fn strict() -> Self {
        Self {
            validate_indices: true,
            max_reserve: 1 << 16,
        }
    }

    /// Старое поведение: индексы принимаются как есть
    pub fn legacy() -> Self {
        Self {
            validate_indices: false,
            ..Self::strict()
        }
    }

    /// Загрузить конфиг из JSON строки (пропущенные поля = strict)
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| MeshCodecError::Config(format!("Failed to parse JSON: {}", e)))
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::strict()
    }
}
