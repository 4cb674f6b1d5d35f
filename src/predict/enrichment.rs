//! Static attack metadata: definition text and explainer video per attack type.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const PLACEHOLDER_DEFINITION: &str = "No information available.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackInfo {
    pub definition: String,
    #[serde(default)]
    pub video_url: String,
}

#[derive(Debug, Clone)]
pub struct AttackCatalog {
    entries: HashMap<String, AttackInfo>,
}

impl Default for AttackCatalog {
    fn default() -> Self {
        let builtin = [
            (
                "Intrusion",
                "An intrusion is unauthorized access to a computer system.",
                "https://www.youtube.com/embed/l-yLEb-MweE",
            ),
            (
                "Malware",
                "Malware is a malicious software designed to harm a system.",
                "https://www.youtube.com/embed/NMYbkzjI5EY",
            ),
            (
                "DDoS",
                "A DDoS attack overwhelms a server with excessive traffic.",
                "https://www.youtube.com/embed/yLbC7G71IyE",
            ),
        ];
        Self {
            entries: builtin
                .into_iter()
                .map(|(name, definition, video)| {
                    (
                        name.to_string(),
                        AttackInfo {
                            definition: definition.to_string(),
                            video_url: video.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl AttackCatalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Built-ins with entries from a JSON object `{name: {definition, video_url}}` laid over them.
    pub fn with_overrides(path: &Path) -> Result<Self, SchemaError> {
        let extra: HashMap<String, AttackInfo> = crate::schema::read_json(path)?;
        let mut catalog = Self::default();
        catalog.entries.extend(extra);
        Ok(catalog)
    }

    pub fn insert(&mut self, name: impl Into<String>, info: AttackInfo) {
        self.entries.insert(name.into(), info);
    }

    /// Unmatched names get the placeholder definition and an empty video reference.
    pub fn lookup(&self, name: &str) -> AttackInfo {
        self.entries.get(name).cloned().unwrap_or_else(|| AttackInfo {
            definition: PLACEHOLDER_DEFINITION.to_string(),
            video_url: String::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
