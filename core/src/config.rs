use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DB_PATH: &str = "predictions.db";
pub const DEFAULT_MODEL_PATH: &str = "data/model/campaign_model.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Process-level settings. The model's own settings (columns, threshold)
/// travel inside the model artifact, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding `customer_predictions`.
    pub db_path: String,
    /// JSON model artifact.
    pub model_path: String,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            model_path: DEFAULT_MODEL_PATH.into(),
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Json { path: display, source })
    }
}
