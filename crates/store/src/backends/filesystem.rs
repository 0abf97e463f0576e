//! Local filesystem chunk store backend.

use crate::error::{StoreError, StoreResult};
use crate::traits::{ByteStream, ChunkStore};
use async_trait::async_trait;
use bytes::Bytes;
use chute_core::UploadId;
use futures::StreamExt;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::instrument;

/// Default chunk size for streaming reads (64 KiB).
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Chunk store backed by a local temp directory.
///
/// Each `(upload_id, index)` pair maps to one file named
/// `{upload_id}-chunk{index}` directly under the root. Upload identifiers
/// are validated at parse time to be path-safe, so keys never escape the
/// root.
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    /// Create a new filesystem store, creating the root if absent.
    pub async fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Path of the backing file for `(upload_id, index)`.
    fn chunk_path(&self, upload_id: &UploadId, index: u32) -> PathBuf {
        self.root.join(format!("{upload_id}-chunk{index}"))
    }
}

#[async_trait]
impl ChunkStore for FilesystemStore {
    #[instrument(skip(self, data), fields(backend = "filesystem", upload_id = %upload_id))]
    async fn write_at(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
        mut data: ByteStream,
        limit: u64,
    ) -> StoreResult<u64> {
        let path = self.chunk_path(upload_id, index);

        // Create-or-open without truncation: a retry of the same chunk
        // overwrites its own byte range and leaves the rest untouched.
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .await?;
        file.seek(SeekFrom::Start(offset)).await?;

        let mut remaining = limit;
        while remaining > 0 {
            let Some(buf) = data.next().await else {
                break;
            };
            let mut buf = buf?;
            if (buf.len() as u64) > remaining {
                buf.truncate(remaining as usize);
            }
            file.write_all(&buf).await?;
            remaining -= buf.len() as u64;
        }
        file.flush().await?;

        Ok(limit - remaining)
    }

    #[instrument(skip(self), fields(backend = "filesystem", upload_id = %upload_id))]
    async fn exists(&self, upload_id: &UploadId, index: u32) -> StoreResult<bool> {
        let path = self.chunk_path(upload_id, index);
        fs::try_exists(&path).await.map_err(StoreError::Io)
    }

    #[instrument(skip(self), fields(backend = "filesystem", upload_id = %upload_id))]
    async fn read_from(
        &self,
        upload_id: &UploadId,
        index: u32,
        offset: u64,
    ) -> StoreResult<ByteStream> {
        let path = self.chunk_path(upload_id, index);
        let mut file = fs::File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound {
                    upload_id: upload_id.to_string(),
                    index,
                }
            } else {
                StoreError::Io(e)
            }
        })?;
        file.seek(SeekFrom::Start(offset)).await?;

        // Stream the file in chunks instead of loading it into memory.
        let stream = async_stream::try_stream! {
            let mut file = file;
            let mut buf = vec![0u8; STREAM_CHUNK_SIZE];
            loop {
                let n = file.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                yield Bytes::copy_from_slice(&buf[..n]);
            }
        };

        Ok(Box::pin(stream))
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
