//! Feature alignment: raw event record → fixed-width vector in canonical column order.
//!
//! Stages run in a fixed order:
//! - [`extract`]: decompose Timestamp / Device Information / Geo-location, drop no-signal fields
//! - [`impute`]: literal defaults for optional categorical fields
//! - [`encode`]: one-hot against the training vocabulary, numeric passthrough
//! - [`align`]: name-keyed reindex to the canonical schema

pub mod align;
pub mod encode;
pub mod extract;
pub mod impute;
mod pipeline;
pub mod user_agent;

pub use encode::EncodedRecord;
pub use pipeline::Preprocessor;
pub use user_agent::UserAgentInfo;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw event: field name → raw text. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed value; blank counts as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value, blank included.
    pub fn get_trimmed(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.trim())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Exactly one value per canonical column, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedVector {
    values: Vec<f32>,
}

impl EncodedVector {
    /// Wrap precomputed values. Only the aligner guarantees canonical width.
    pub fn from_values(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}
