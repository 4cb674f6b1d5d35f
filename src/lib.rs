//! Attack classifier: network security events → attack type, via a pre-trained model.
//!
//! Modular structure:
//! - [`schema`]: Canonical training columns and implied category vocabularies
//! - [`features`]: Extract / impute / encode / align pipeline producing fixed-width vectors
//! - [`model`]: Classifier backends (JSON decision tree, ONNX) and label decoding
//! - [`predict`]: Prediction adapter, attack metadata, startup context
//! - [`batch`]: CSV batch classification on a worker pool
//! - [`logging`]: Structured JSON logging

pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod predict;
pub mod schema;

pub use batch::{BatchProcessor, BatchSummary, RowFailure};
pub use config::ServiceConfig;
pub use error::{AlignmentError, FieldParseError, ModelError, PipelineError, SchemaError};
pub use features::{EncodedVector, Preprocessor, RawRecord};
pub use logging::StructuredLogger;
pub use model::{Classifier, LabelDecoder, OnnxClassifier, TreeClassifier};
pub use predict::{AttackCatalog, ClassifierContext, PredictionAdapter, PredictionResult};
pub use schema::{CanonicalSchema, CategoryVocabulary, SchemaContext};
