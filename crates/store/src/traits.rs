//! Chunk store trait definitions.

use crate::error::StoreResult;
use async_trait::async_trait;
use bytes::Bytes;
use chute_core::UploadId;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for streaming chunk payloads.
pub type ByteStream = Pin<Box<dyn Stream<Item = StoreResult<Bytes>> + Send>>;

/// Keyed byte-range store holding the chunks of in-flight uploads.
///
/// All coordination state for a chunked upload lives here: a chunk is
/// "present" iff its backing object exists, and upload completion is
/// inferred from presence alone. Distinct `(upload_id, index)` pairs map to
/// independent objects, so writes for different chunks never contend.
#[async_trait]
pub trait ChunkStore: Send + Sync + 'static {
    /// Create or open the chunk `(upload_id, index)` and copy at most
    /// `limit` bytes from `data` into it starting at byte `offset`.
    ///
    /// Rewriting an existing chunk overwrites at the same offset; the store
    /// does not detect conflicting resubmissions. Returns the number of
    /// bytes written.
    async fn write_at(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
        data: ByteStream,
        limit: u64,
    ) -> StoreResult<u64>;

    /// Check whether a backing object exists for `(upload_id, index)`.
    ///
    /// Pure existence check: a partially written chunk still counts.
    async fn exists(&self, upload_id: &UploadId, index: u32) -> StoreResult<bool>;

    /// Open the chunk for sequential read from byte `offset` to the end.
    ///
    /// An offset at or past the end of the object yields an empty stream.
    async fn read_from(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
    ) -> StoreResult<ByteStream>;

    /// Get the name of this store backend, for metrics and logging.
    fn backend_name(&self) -> &'static str;
}

/// Wrap an in-memory buffer as a single-item payload stream.
///
/// Convenience for callers and tests that already hold the full payload.
pub fn payload_from_bytes(data: Bytes) -> ByteStream {
    Box::pin(futures::stream::iter([Ok(data)]))
}
