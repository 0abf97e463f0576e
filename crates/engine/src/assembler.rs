//! Ordered chunk concatenation into the finished file.

use crate::error::EngineResult;
use chute_core::UploadId;
use chute_store::ChunkStore;
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

/// Concatenates the chunks of a completed upload into one output file.
pub struct Assembler {
    store: Arc<dyn ChunkStore>,
}

impl Assembler {
    /// Create an assembler over the given store.
    pub fn new(store: Arc<dyn ChunkStore>) -> Self {
        Self { store }
    }

    /// Stream every chunk for `upload_id` in ascending index order into
    /// `dest`, returning the total bytes written.
    ///
    /// Chunk files carry their payload at the chunk's final-file byte
    /// offset, so chunk `i` is read starting at the cumulative byte count
    /// written so far and copied through to EOF. Copy-to-EOF rather than a
    /// fixed-size copy keeps assembly correct when a chunk's on-disk size
    /// differs from its declared size.
    ///
    /// The output is built under a staging name and renamed into place, so
    /// a duplicate trigger recreates `dest` rather than racing a partial
    /// write. Chunk files are left in the store; housekeeping is an
    /// external concern.
    #[instrument(skip(self), fields(upload_id = %upload_id, total))]
    pub async fn assemble(
        &self,
        upload_id: &UploadId,
        total: u32,
        dest: &Path,
    ) -> EngineResult<u64> {
        let staging_suffix = format!(".assemble.{}", Uuid::new_v4());
        let staging = dest.with_file_name(
            dest.file_name()
                .map(|n| format!("{}{}", n.to_string_lossy(), staging_suffix))
                .unwrap_or_else(|| staging_suffix.clone()),
        );

        let mut out = fs::File::create(&staging).await?;
        let mut bytes_written: u64 = 0;
        for index in 0..total {
            let mut chunk = self.store.read_from(upload_id, index, bytes_written).await?;
            while let Some(buf) = chunk.next().await {
                let buf = buf?;
                out.write_all(&buf).await?;
                bytes_written += buf.len() as u64;
            }
        }
        out.sync_all().await?;
        drop(out);
        fs::rename(&staging, dest).await?;

        tracing::debug!(bytes = bytes_written, "chunks assembled");
        Ok(bytes_written)
    }
}
