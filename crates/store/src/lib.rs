//! Chunk storage abstraction and backends for chute.
//!
//! This crate provides:
//! - The `ChunkStore` trait: create-or-open-for-write-at-offset, existence
//!   check, and sequential read for `(upload_id, chunk_index)` keys
//! - Backends: local filesystem and in-memory

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::{filesystem::FilesystemStore, memory::MemoryStore};
pub use error::{StoreError, StoreResult};
pub use traits::{ByteStream, ChunkStore, payload_from_bytes};

use chute_core::StoreConfig;
use std::sync::Arc;

/// Create a chunk store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ChunkStore>> {
    match config {
        StoreConfig::Filesystem { path } => {
            let store = FilesystemStore::new(path).await?;
            Ok(Arc::new(store))
        }
        StoreConfig::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chute_core::UploadId;

    #[tokio::test]
    async fn from_config_filesystem_ok() {
        let temp = tempfile::tempdir().unwrap();
        let config = StoreConfig::Filesystem {
            path: temp.path().join("chunks"),
        };

        let store = from_config(&config).await.unwrap();
        assert_eq!(store.backend_name(), "filesystem");

        let id = UploadId::parse("cfg-upload").unwrap();
        store
            .write_at(&id, 0, 0, payload_from_bytes(Bytes::from_static(b"hi")), 2)
            .await
            .unwrap();
        assert!(store.exists(&id, 0).await.unwrap());
    }

    #[tokio::test]
    async fn from_config_memory_ok() {
        let store = from_config(&StoreConfig::Memory).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
