//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("required chunk field \"{0}\" missing")]
    MissingChunkField(&'static str),

    #[error("file payload missing")]
    MissingPayload,

    #[error("invalid upload id: {0}")]
    InvalidUploadId(String),

    #[error("total chunk count must be at least 1")]
    InvalidChunkCount,

    #[error("chunk index {index} out of range for {total} chunks")]
    ChunkIndexOutOfRange { index: u32, total: u32 },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
