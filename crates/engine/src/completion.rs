//! Completion detection from chunk-file existence.

use crate::error::EngineResult;
use chute_core::UploadId;
use chute_store::ChunkStore;
use std::sync::Arc;
use tracing::instrument;

/// Infers upload completion from chunk presence in the store.
///
/// There is no explicit "done" signal from the client: an upload is
/// complete the instant a backing chunk exists for every index. The check
/// runs after each chunk write, so whichever request lands the last chunk
/// triggers assembly.
pub struct CompletionDetector {
    store: Arc<dyn ChunkStore>,
}

impl CompletionDetector {
    /// Create a detector over the given store.
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self { store }
    }

    /// True iff a backing chunk exists for every index in `[0, total)`.
    ///
    /// Pure existence check: contents and sizes are never inspected, so a
    /// chunk left short by a crashed write still counts as present.
    #[instrument(skip(self), fields(upload_id = %upload_id))]
    pub async fn is_complete(&self, upload_id: &UploadId, total: u32) -> EngineResult<bool> {
        for index in 0..total {
            if !self.store.exists(upload_id, index).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
