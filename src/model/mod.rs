//! Opaque trained classifier backends and the class-index → attack-name decoder.

mod labels;
mod onnx;
mod tree;

pub use labels::LabelDecoder;
pub use onnx::OnnxClassifier;
pub use tree::TreeClassifier;

use crate::error::ModelError;
use crate::features::EncodedVector;
use std::path::Path;

/// A fitted classifier over canonical-width vectors. Shared read-only across workers.
pub trait Classifier: Send + Sync {
    /// One class index per input, in input order.
    fn predict(&self, inputs: &[EncodedVector]) -> Result<Vec<usize>, ModelError>;

    /// Input width the model was fitted on, when the artifact records it.
    fn n_features(&self) -> Option<usize>;

    /// Number of classes the model can emit, when the artifact records it.
    fn n_classes(&self) -> Option<usize> {
        None
    }

    fn backend(&self) -> &'static str;
}

/// `.onnx` loads through ONNX Runtime; any other extension is read as a JSON decision tree.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let is_onnx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false);
    if is_onnx {
        Ok(Box::new(OnnxClassifier::load(path)?))
    } else {
        Ok(Box::new(TreeClassifier::load(path)?))
    }
}
