//! Error handling

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    // Artifact errors
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("failed to read artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    ArtifactParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    LayoutMismatch(#[from] crate::logic::features::LayoutMismatchError),

    // Synthesis errors
    #[error("invalid distribution: {0}")]
    Distribution(String),

    // Preprocessing errors
    #[error("unknown label {label:?} for column {column}")]
    UnknownCategory { column: String, label: String },

    #[error("shape mismatch: {0}")]
    Shape(String),

    // Inference errors
    #[error("inference failed: {0}")]
    Inference(String),

    // Evaluation errors
    #[error("metrics undefined: {0}")]
    DegenerateMetrics(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
