//! Chunk store error types.

use thiserror::Error;

/// Chunk store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("chunk not found: {upload_id} index {index}")]
    NotFound { upload_id: String, index: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// Result type for chunk store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
