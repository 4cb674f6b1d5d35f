//! Preprocessing pipeline: raw record → extract → impute → encode → align → vector.

use super::{align, encode, extract, impute, EncodedVector, RawRecord};
use crate::config::FeaturesConfig;
use crate::error::PipelineError;
use crate::schema::SchemaContext;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless per record; holds only the shared read-only schema context.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    ctx: Arc<SchemaContext>,
    config: FeaturesConfig,
}

impl Preprocessor {
    pub fn new(ctx: Arc<SchemaContext>, config: FeaturesConfig) -> Self {
        Self { ctx, config }
    }

    pub fn context(&self) -> &SchemaContext {
        &self.ctx
    }

    pub fn transform(&self, record: &RawRecord) -> Result<EncodedVector, PipelineError> {
        let mut working = extract::extract(record.clone(), &self.config.timestamp_formats)?;
        impute::impute(&mut working);
        let encoded = encode::encode(&working, &self.ctx)?;

        for (column, value) in &encoded.unknown {
            if self.config.warn_unknown_categories {
                warn!(column = %column, value = %value, "category outside training vocabulary");
            } else {
                debug!(column = %column, value = %value, "category outside training vocabulary");
            }
        }

        Ok(align::align(&encoded, &self.ctx.schema)?)
    }
}
