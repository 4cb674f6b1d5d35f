//! Categorical encoder: one-hot against the training vocabulary, plus numeric passthrough.
//!
//! Output is a name-keyed map of arbitrary width; [`super::align`] fixes order and width.
//! A value outside a column's vocabulary sets no indicator for that column.

use super::RawRecord;
use crate::error::FieldParseError;
use crate::schema::{columns, SchemaContext};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedRecord {
    /// Column name → value. Absent names are zero.
    pub values: HashMap<String, f32>,
    /// `(column, value)` pairs seen outside the vocabulary
    pub unknown: Vec<(String, String)>,
}

pub fn encode(record: &RawRecord, ctx: &SchemaContext) -> Result<EncodedRecord, FieldParseError> {
    let mut out = EncodedRecord::default();

    for column in columns::CATEGORICAL {
        let Some(value) = record.get_trimmed(column) else {
            continue;
        };
        if ctx.vocabulary.contains(column, value) {
            out.values.insert(columns::indicator(column, value), 1.0);
        } else if !value.is_empty() {
            out.unknown.push((column.to_string(), value.to_string()));
        }
    }

    for column in columns::NUMERIC {
        let Some(raw) = record.get(column) else {
            continue;
        };
        let v = parse_finite(raw).ok_or_else(|| FieldParseError::Invalid {
            field: column.to_string(),
            value: raw.to_string(),
        })?;
        out.values.insert(column.to_string(), v);
    }

    // Other fields the schema names verbatim pass through when numeric. Indicator names belong
    // to the one-hot step only; a raw field spelled like one must not set or clear it.
    for (name, raw) in record.iter() {
        if columns::CATEGORICAL.contains(&name) || columns::NUMERIC.contains(&name) {
            continue;
        }
        if !ctx.schema.contains(name) || columns::split_indicator(name).is_some() {
            continue;
        }
        if let Some(v) = parse_finite(raw.trim()) {
            out.values.entry(name.to_string()).or_insert(v);
        }
    }

    Ok(out)
}

/// NaN and infinities parse as f32 but have no place in a split comparison.
fn parse_finite(raw: &str) -> Option<f32> {
    raw.parse::<f32>().ok().filter(|v| v.is_finite())
}
