//! Column aligner: name-keyed reindex of an encoded record onto the canonical schema.
//!
//! Every slot is filled by looking up its column name; nothing is copied by position.
//! Encoded names the schema does not list are discarded, missing ones are zero.

use super::{EncodedRecord, EncodedVector};
use crate::error::AlignmentError;
use crate::schema::CanonicalSchema;

pub fn align(encoded: &EncodedRecord, schema: &CanonicalSchema) -> Result<EncodedVector, AlignmentError> {
    let values: Vec<f32> = schema
        .columns()
        .iter()
        .map(|name| encoded.values.get(name).copied().unwrap_or(0.0))
        .collect();

    if values.len() != schema.len() {
        return Err(AlignmentError::WidthMismatch {
            expected: schema.len(),
            actual: values.len(),
        });
    }
    Ok(EncodedVector::from_values(values))
}
