//! Reads startup artifacts (JSON) and fingerprints them for version-skew diagnosis.

use super::SchemaContext;
use crate::error::SchemaError;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SchemaError> {
    let data = std::fs::read(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| SchemaError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Canonical column list: a JSON array of names.
pub fn load_schema(path: &Path) -> Result<SchemaContext, SchemaError> {
    let columns: Vec<String> = read_json(path)?;
    SchemaContext::from_columns(columns)
}

/// Class names indexed by class id: a JSON array.
pub fn load_labels(path: &Path) -> Result<Vec<String>, SchemaError> {
    let labels: Vec<String> = read_json(path)?;
    if labels.is_empty() {
        return Err(SchemaError::NoLabels);
    }
    Ok(labels)
}

/// Hex SHA-256 of an artifact file.
pub fn fingerprint(path: &Path) -> Result<String, SchemaError> {
    let data = std::fs::read(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(format!("{:x}", Sha256::digest(&data)))
}
