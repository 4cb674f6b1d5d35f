use crate::error::{ModelError, SchemaError};
use std::path::Path;

/// Maps internal class ids back to attack-type names.
#[derive(Debug, Clone)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, SchemaError> {
        if classes.is_empty() {
            return Err(SchemaError::NoLabels);
        }
        Ok(Self { classes })
    }

    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        Self::new(crate::schema::load_labels(path)?)
    }

    pub fn decode(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass {
                index,
                classes: self.classes.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}
