//! Prediction: adapter over the opaque classifier, attack metadata, and the service context
//! that ties preprocessing and prediction together.

mod adapter;
mod enrichment;

pub use adapter::{PredictionAdapter, PredictionResult};
pub use enrichment::{AttackCatalog, AttackInfo, PLACEHOLDER_DEFINITION};

use crate::config::{FeaturesConfig, ServiceConfig};
use crate::error::{ModelError, PipelineError, SchemaError};
use crate::features::{EncodedVector, Preprocessor, RawRecord};
use crate::model::{load_classifier, LabelDecoder};
use crate::schema::{fingerprint, load_schema, SchemaContext};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Everything loaded at startup. Immutable afterwards; share behind an `Arc`.
pub struct ClassifierContext {
    preprocessor: Preprocessor,
    adapter: PredictionAdapter,
}

impl ClassifierContext {
    /// Load schema, labels, classifier and attack metadata. Any failure is fatal.
    pub fn load(config: &ServiceConfig) -> Result<Self, SchemaError> {
        let artifacts = &config.artifacts;
        let schema = load_schema(&artifacts.schema_path)?;
        let decoder = LabelDecoder::load(&artifacts.labels_path)?;
        let classifier = load_classifier(&artifacts.model_path)?;
        let catalog = match &artifacts.attack_info_path {
            Some(path) => AttackCatalog::with_overrides(path)?,
            None => AttackCatalog::default(),
        };

        info!(
            schema = %artifacts.schema_path.display(),
            schema_sha256 = %fingerprint(&artifacts.schema_path)?,
            columns = schema.width(),
            classes = decoder.len(),
            backend = classifier.backend(),
            attack_entries = catalog.len(),
            "artifacts loaded"
        );

        let adapter = PredictionAdapter::new(classifier, decoder, catalog);
        Self::new(schema, adapter, config.features.clone())
    }

    /// Rejects a classifier whose recorded input width differs from the schema, or that can
    /// emit more classes than the label table names.
    pub fn new(
        schema: SchemaContext,
        adapter: PredictionAdapter,
        features: FeaturesConfig,
    ) -> Result<Self, SchemaError> {
        if let Some(model) = adapter.classifier().n_features() {
            if model != schema.width() {
                return Err(SchemaError::WidthSkew {
                    model,
                    schema: schema.width(),
                });
            }
        }
        if let Some(model) = adapter.classifier().n_classes() {
            if model > adapter.decoder().len() {
                return Err(SchemaError::ClassSkew {
                    model,
                    labels: adapter.decoder().len(),
                });
            }
        }
        Ok(Self {
            preprocessor: Preprocessor::new(Arc::new(schema), features),
            adapter,
        })
    }

    pub fn schema(&self) -> &SchemaContext {
        self.preprocessor.context()
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn adapter(&self) -> &PredictionAdapter {
        &self.adapter
    }

    pub fn encode(&self, record: &RawRecord) -> Result<EncodedVector, PipelineError> {
        self.preprocessor.transform(record)
    }

    pub fn classify_record(&self, record: &RawRecord) -> Result<PredictionResult, PipelineError> {
        let vector = self.preprocessor.transform(record)?;
        Ok(self.adapter.predict_one(&vector)?)
    }

    /// Per-record isolation: one failure never affects the others. Output follows input order.
    ///
    /// Transforms run on the current rayon pool; successful vectors go to the classifier in one call.
    pub fn classify_records(&self, records: &[RawRecord]) -> Vec<Result<PredictionResult, PipelineError>> {
        let transformed: Vec<Result<EncodedVector, PipelineError>> = records
            .par_iter()
            .map(|r| self.preprocessor.transform(r))
            .collect();

        let mut vectors = Vec::with_capacity(transformed.len());
        let mut failures: Vec<Option<PipelineError>> = Vec::with_capacity(transformed.len());
        for t in transformed {
            match t {
                Ok(v) => {
                    vectors.push(v);
                    failures.push(None);
                }
                Err(e) => failures.push(Some(e)),
            }
        }

        let expected = vectors.len();
        let mut predictions = match self.adapter.predict(&vectors) {
            Ok(p) => p,
            Err(e) => vec![Err(e); expected],
        }
        .into_iter();

        failures
            .into_iter()
            .map(|failure| match failure {
                Some(e) => Err(e),
                None => predictions
                    .next()
                    .unwrap_or(Err(ModelError::OutputCount { expected, actual: 0 }))
                    .map_err(PipelineError::from),
            })
            .collect()
    }
}
