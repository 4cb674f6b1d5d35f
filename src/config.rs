//! Service configuration. Artifact locations, feature parsing, batch sizing, logging.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no `--config` flag is given.
pub const CONFIG_ENV: &str = "ATTACK_CLASSIFIER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Startup artifacts produced by the training process
    pub artifacts: ArtifactsConfig,
    /// Field extraction parameters
    pub features: FeaturesConfig,
    /// CSV batch processing
    pub batch: BatchConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Canonical training column list (JSON array of names)
    pub schema_path: PathBuf,
    /// Class names indexed by class id (JSON array)
    pub labels_path: PathBuf,
    /// Classifier: `.onnx` for ONNX Runtime, anything else is a JSON decision tree
    pub model_path: PathBuf,
    /// Optional attack definitions merged over the built-in table
    pub attack_info_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// chrono format strings tried in order on the Timestamp field
    pub timestamp_formats: Vec<String>,
    /// Log out-of-vocabulary categorical values at warn instead of debug
    pub warn_unknown_categories: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads; 0 means one per CPU
    pub workers: usize,
    /// Rows read, transformed and classified together
    pub chunk_rows: usize,
    /// Upper bound on data rows accepted from one file
    pub max_rows: Option<usize>,
    /// Header of the appended prediction column
    pub prediction_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            features: FeaturesConfig::default(),
            batch: BatchConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            schema_path: PathBuf::from("columns_train.json"),
            labels_path: PathBuf::from("label_encoder.json"),
            model_path: PathBuf::from("model.json"),
            attack_info_path: None,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            timestamp_formats: vec![
                "%d/%m/%Y %H:%M:%S".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M".to_string(),
            ],
            warn_unknown_categories: true,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            chunk_rows: 1024,
            max_rows: None,
            prediction_column: "Predicted Attack Type".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; a missing file yields defaults, a broken one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config path: explicit flag, then `ATTACK_CLASSIFIER_CONFIG`, then `config.json`.
    pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"batch": {{"workers": 2}}}}"#).unwrap();
        let c = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(c.batch.workers, 2);
        assert_eq!(c.batch.chunk_rows, 1024);
        assert_eq!(c.features.timestamp_formats.len(), 3);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ServiceConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
