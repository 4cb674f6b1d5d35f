//! Schema registry: canonical training columns and the category vocabularies they imply.
//!
//! Built once at startup and shared read-only; every pipeline stage receives it explicitly.

pub mod columns;
mod loader;

pub use loader::{fingerprint, load_labels, load_schema};
pub(crate) use loader::read_json;

use crate::error::SchemaError;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Ordered column list fixed at training time.
#[derive(Debug, Clone)]
pub struct CanonicalSchema {
    columns: Vec<String>,
    index: HashSet<String>,
}

impl CanonicalSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        let mut index = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !index.insert(c.clone()) {
                return Err(SchemaError::DuplicateColumn(c.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }
}

/// Closed set of training-time values per categorical column.
#[derive(Debug, Clone, Default)]
pub struct CategoryVocabulary {
    values: HashMap<&'static str, BTreeSet<String>>,
}

impl CategoryVocabulary {
    /// Recover vocabularies from `<column>_<value>` names. Longest matching column prefix wins.
    pub fn from_schema(schema: &CanonicalSchema) -> Self {
        let mut values: HashMap<&'static str, BTreeSet<String>> = HashMap::new();
        for name in schema.columns() {
            if let Some((col, value)) = columns::split_indicator(name) {
                values.entry(col).or_default().insert(value.to_string());
            }
        }
        Self { values }
    }

    pub fn contains(&self, column: &str, value: &str) -> bool {
        self.values
            .get(column)
            .map(|set| set.contains(value))
            .unwrap_or(false)
    }

    pub fn values(&self, column: &str) -> impl Iterator<Item = &str> {
        self.values
            .get(column)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    pub fn size(&self, column: &str) -> usize {
        self.values.get(column).map(BTreeSet::len).unwrap_or(0)
    }
}

/// Immutable process-wide context handed to each stage.
#[derive(Debug, Clone)]
pub struct SchemaContext {
    pub schema: CanonicalSchema,
    pub vocabulary: CategoryVocabulary,
}

impl SchemaContext {
    pub fn new(schema: CanonicalSchema) -> Self {
        let vocabulary = CategoryVocabulary::from_schema(&schema);
        Self { schema, vocabulary }
    }

    pub fn from_columns<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schema = CanonicalSchema::new(columns.into_iter().map(Into::into).collect())?;
        Ok(Self::new(schema))
    }

    pub fn width(&self) -> usize {
        self.schema.len()
    }
}
