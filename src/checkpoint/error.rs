//! Checkpoint error types.

use crate::core::BuildError;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Reading or writing the document file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The JSON document could not be produced or parsed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The binary document could not be produced or parsed
    #[error("Binary document error: {0}")]
    Binary(#[from] bincode::Error),

    /// The document parsed but describes an invalid machine
    #[error("Document describes an invalid machine: {0}")]
    Build(#[from] BuildError),

    /// The document contradicts itself
    #[error("Checkpoint validation failed: {0}")]
    ValidationFailed(String),
}
