//! Engine error types.

use chute_store::StoreError;
use thiserror::Error;

/// Upload pipeline errors.
///
/// Every variant renders to a caller-facing message; the pipeline collects
/// these per request into an ordered error list rather than aborting the
/// whole request on first failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required chunk field was absent or invalid.
    #[error(transparent)]
    Field(#[from] chute_core::Error),

    /// Declared chunk size exceeds the configured maximum. Checked before
    /// any write occurs.
    #[error("file chunk is too large: {size} bytes (max {max})")]
    ChunkTooLarge { size: u64, max: u64 },

    /// Chunk store failure during write, existence check, or read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Filesystem failure during payload spooling or assembly.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;
