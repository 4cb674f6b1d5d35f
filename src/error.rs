//! Error kinds per pipeline stage. Boundary code turns these into user-facing text.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Startup artifact missing, corrupt or inconsistent. Fatal: nothing is served.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt artifact {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("canonical schema is empty")]
    EmptySchema,
    #[error("canonical schema lists column {0:?} more than once")]
    DuplicateColumn(String),
    #[error("label table is empty")]
    NoLabels,
    #[error("classifier expects {model} features but schema has {schema} columns")]
    WidthSkew { model: usize, schema: usize },
    #[error("classifier emits {model} classes but label table has {labels}")]
    ClassSkew { model: usize, labels: usize },
    #[error("classifier failed to load: {0}")]
    Model(#[from] ModelError),
}

/// A field carrying required signal could not be interpreted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldParseError {
    #[error("missing required field {0:?}")]
    Missing(&'static str),
    #[error("field {field:?} has unparseable value {value:?}")]
    Invalid { field: String, value: String },
}

/// Output width differs from the canonical schema; signals artifact/pipeline version skew.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlignmentError {
    #[error("encoded vector has {actual} values, schema expects {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact {path}: {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("invalid tree model: {0}")]
    InvalidTree(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("classifier returned {actual} predictions for {expected} inputs")]
    OutputCount { expected: usize, actual: usize },
    #[error("class index {index} outside label table of {classes}")]
    UnknownClass { index: usize, classes: usize },
    #[error("input has {actual} features, model expects {expected}")]
    InputWidth { expected: usize, actual: usize },
}

/// Failure classifying one record.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Field(#[from] FieldParseError),
    #[error(transparent)]
    Alignment(#[from] AlignmentError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PipelineError {
    /// Short text suitable for showing to the person who submitted the record.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Field(FieldParseError::Missing(field)) => {
                format!("The field \"{field}\" is required.")
            }
            PipelineError::Field(FieldParseError::Invalid { field, value }) => {
                format!("The value \"{value}\" for \"{field}\" could not be read.")
            }
            PipelineError::Alignment(_) | PipelineError::Model(_) => {
                "The classifier could not process this record.".to_string()
            }
        }
    }
}

/// Failure that aborts a whole batch (as opposed to a single row).
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("input has no header row")]
    NoHeader,
    #[error("input already has a column named {0:?}")]
    ColumnClash(String),
}
