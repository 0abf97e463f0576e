//! Chunk persistence with an early size guard.

use crate::error::{EngineError, EngineResult};
use chute_core::{ChunkMeta, UploadConfig};
use chute_store::{ByteStream, ChunkStore};
use std::sync::Arc;
use tracing::instrument;

/// Validates and persists one chunk of a chunked upload.
pub struct ChunkWriter {
    store: Arc<dyn ChunkStore>,
    max_upload_size: u64,
}

impl ChunkWriter {
    /// Create a writer over the given store with the configured size policy.
    pub fn new(store: Arc<dyn ChunkStore>, config: &UploadConfig) -> Self {
        Self {
            store,
            max_upload_size: config.max_upload_size,
        }
    }

    /// Size-guard the chunk's declared size, then copy the payload into the
    /// store at the chunk's byte offset.
    ///
    /// The guard stops oversized chunks before anything touches disk; it is
    /// a fast-fail check only and does not replace validation of the final
    /// assembled file, which remains the receiver's job. Returns the number
    /// of bytes written.
    #[instrument(
        skip(self, payload),
        fields(upload_id = %meta.upload_id, index = meta.chunk_index)
    )]
    pub async fn write_chunk(&self, meta: &ChunkMeta, payload: ByteStream) -> EngineResult<u64> {
        if meta.chunk_byte_size > self.max_upload_size {
            return Err(EngineError::ChunkTooLarge {
                size: meta.chunk_byte_size,
                max: self.max_upload_size,
            });
        }

        let written = self
            .store
            .write_at(
                &meta.upload_id,
                meta.chunk_index,
                meta.chunk_byte_offset,
                payload,
                meta.chunk_byte_size,
            )
            .await?;

        tracing::debug!(bytes = written, "chunk persisted");
        Ok(written)
    }
}
