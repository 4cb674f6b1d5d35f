//! ONNX Runtime classifier. Input: [batch, n_features] f32, first output: int64 class labels.
//! Matches what skl2onnx emits for sklearn classifiers (`output_label`).

use super::Classifier;
use crate::error::ModelError;
use crate::features::EncodedVector;
use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let load_err = |reason: String| ModelError::Load {
            path: path.to_path_buf(),
            reason,
        };
        if !path.exists() {
            return Err(load_err("file not found".into()));
        }

        let session = Session::builder()
            .map_err(|e| load_err(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_err(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| load_err(e.to_string()))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "output_label".to_string());

        tracing::info!(path = %path.display(), output = %output_name, "ONNX classifier loaded");
        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, inputs: &[EncodedVector]) -> Result<Vec<usize>, ModelError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let width = inputs[0].len();
        let mut flat = Vec::with_capacity(inputs.len() * width);
        for v in inputs {
            if v.len() != width {
                return Err(ModelError::InputWidth {
                    expected: width,
                    actual: v.len(),
                });
            }
            flat.extend_from_slice(v.as_slice());
        }

        let arr = Array2::from_shape_vec((inputs.len(), width), flat)
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let tensor = Tensor::from_array(arr).map_err(|e| ModelError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Inference("session lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| ModelError::Inference(format!("missing output {}", self.output_name)))?;
        let (_, labels) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        if labels.len() != inputs.len() {
            return Err(ModelError::OutputCount {
                expected: inputs.len(),
                actual: labels.len(),
            });
        }
        labels
            .iter()
            .map(|&l| {
                usize::try_from(l).map_err(|_| ModelError::Inference(format!("negative class label {l}")))
            })
            .collect()
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
