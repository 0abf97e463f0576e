//! In-memory chunk store backend.

use crate::error::{StoreError, StoreResult};
use crate::traits::{ByteStream, ChunkStore};
use async_trait::async_trait;
use bytes::Bytes;
use chute_core::UploadId;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::instrument;

/// In-memory chunk store for tests and ephemeral pipelines.
///
/// Mirrors the filesystem backend's byte-range semantics: writing at an
/// offset past the current end zero-fills the gap, and rewriting a range
/// overwrites in place.
#[derive(Default)]
pub struct MemoryStore {
    chunks: Mutex<HashMap<(String, u32), Vec<u8>>>,
}

/// Largest extent (offset plus payload) a single in-memory chunk may
/// occupy. Offsets are client-controlled; without a bound one bogus
/// chunk could demand an allocation the size of the address space.
const MAX_CHUNK_EXTENT: u64 = 1024 * 1024 * 1024;

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChunkStore for MemoryStore {
    #[instrument(skip(self, data), fields(backend = "memory", upload_id = %upload_id))]
    async fn write_at(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
        mut data: ByteStream,
        limit: u64,
    ) -> StoreResult<u64> {
        // Drain the stream before taking the lock; the lock is held only
        // for the in-memory splice.
        let mut payload = Vec::new();
        while (payload.len() as u64) < limit {
            let Some(buf) = data.next().await else {
                break;
            };
            let buf = buf?;
            let remaining = (limit as usize).saturating_sub(payload.len());
            payload.extend_from_slice(&buf[..buf.len().min(remaining)]);
        }

        let end = offset
            .checked_add(payload.len() as u64)
            .filter(|&end| end <= MAX_CHUNK_EXTENT)
            .ok_or_else(|| {
                StoreError::InvalidRange(format!(
                    "chunk extent {offset}+{} exceeds {MAX_CHUNK_EXTENT} bytes",
                    payload.len()
                ))
            })?;
        let offset = offset as usize;
        let end = end as usize;

        let mut chunks = self.chunks.lock().expect("chunk map lock poisoned");
        let entry = chunks
            .entry((upload_id.to_string(), index))
            .or_default();
        if entry.len() < end {
            entry.resize(end, 0);
        }
        entry[offset..end].copy_from_slice(&payload);

        Ok(payload.len() as u64)
    }

    #[instrument(skip(self), fields(backend = "memory", upload_id = %upload_id))]
    async fn exists(&self, upload_id: &UploadId, index: u32) -> StoreResult<bool> {
        let chunks = self.chunks.lock().expect("chunk map lock poisoned");
        Ok(chunks.contains_key(&(upload_id.to_string(), index)))
    }

    #[instrument(skip(self), fields(backend = "memory", upload_id = %upload_id))]
    async fn read_from(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
    ) -> StoreResult<ByteStream> {
        let chunks = self.chunks.lock().expect("chunk map lock poisoned");
        let entry = chunks
            .get(&(upload_id.to_string(), index))
            .ok_or_else(|| StoreError::NotFound {
                upload_id: upload_id.to_string(),
                index,
            })?;

        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let data = if start >= entry.len() {
            Bytes::new()
        } else {
            Bytes::copy_from_slice(&entry[start..])
        };

        Ok(Box::pin(futures::stream::iter([Ok(data)])))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
