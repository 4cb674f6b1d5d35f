//! Prediction adapter: classifier + label decoder + enrichment lookup.

use super::enrichment::AttackCatalog;
use crate::error::ModelError;
use crate::features::EncodedVector;
use crate::model::{Classifier, LabelDecoder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub attack_type: String,
    pub definition: String,
    /// Explainer video URL; empty when the attack type has no entry
    pub video_reference: String,
}

pub struct PredictionAdapter {
    classifier: Box<dyn Classifier>,
    decoder: LabelDecoder,
    catalog: AttackCatalog,
}

impl PredictionAdapter {
    pub fn new(classifier: Box<dyn Classifier>, decoder: LabelDecoder, catalog: AttackCatalog) -> Self {
        Self {
            classifier,
            decoder,
            catalog,
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn decoder(&self) -> &LabelDecoder {
        &self.decoder
    }

    /// One result per input, in input order. The outer error means the classifier call itself
    /// failed; decoding and enrichment fail per row.
    pub fn predict(
        &self,
        vectors: &[EncodedVector],
    ) -> Result<Vec<Result<PredictionResult, ModelError>>, ModelError> {
        if vectors.is_empty() {
            return Ok(Vec::new());
        }
        let classes = self.classifier.predict(vectors)?;
        if classes.len() != vectors.len() {
            return Err(ModelError::OutputCount {
                expected: vectors.len(),
                actual: classes.len(),
            });
        }
        Ok(classes.into_iter().map(|c| self.enrich(c)).collect())
    }

    pub fn predict_one(&self, vector: &EncodedVector) -> Result<PredictionResult, ModelError> {
        let mut out = self.predict(std::slice::from_ref(vector))?;
        out.pop().unwrap_or(Err(ModelError::OutputCount {
            expected: 1,
            actual: 0,
        }))
    }

    fn enrich(&self, class: usize) -> Result<PredictionResult, ModelError> {
        let name = self.decoder.decode(class)?;
        let info = self.catalog.lookup(name);
        Ok(PredictionResult {
            attack_type: name.to_string(),
            definition: info.definition,
            video_reference: info.video_url,
        })
    }
}
