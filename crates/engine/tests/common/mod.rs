//! Shared helpers for pipeline integration tests.

use async_trait::async_trait;
use chute_core::{RawChunkFields, UploadItem, UploadRequest};
use chute_engine::{FileReceiver, FinishedFile};
use std::path::Path;
use std::sync::Mutex;
use uuid::Uuid;

/// Test receiver that records every call and optionally enforces a size
/// policy, standing in for the external storage collaborator.
#[derive(Default)]
pub struct StubReceiver {
    max_size: Option<u64>,
    received: Mutex<Vec<UploadItem>>,
}

#[allow(dead_code)]
impl StubReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any item whose declared size exceeds `max`.
    pub fn with_max_size(max: u64) -> Self {
        Self {
            max_size: Some(max),
            ..Self::default()
        }
    }

    /// Number of times the pipeline handed a finished file over.
    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Items received so far, in call order.
    pub fn received(&self) -> Vec<UploadItem> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileReceiver for StubReceiver {
    async fn receive(&self, item: &UploadItem) -> Result<FinishedFile, String> {
        self.received.lock().unwrap().push(item.clone());
        if let Some(max) = self.max_size {
            if item.declared_size > max {
                return Err(format!("{}: exceeds maximum allowed size", item.name));
            }
        }
        Ok(FinishedFile {
            id: Uuid::new_v4(),
            filename: item.name.clone(),
            size: item.declared_size,
        })
    }
}

/// Spool `bytes` to a payload file under `dir` and describe it as an
/// upload item.
#[allow(dead_code)]
pub fn write_item(dir: &Path, name: &str, bytes: &[u8]) -> UploadItem {
    let temp_path = dir.join(name);
    std::fs::write(&temp_path, bytes).unwrap();
    UploadItem {
        name: name.to_string(),
        mime_type: "application/octet-stream".to_string(),
        temp_path,
        declared_size: bytes.len() as u64,
    }
}

/// Build a chunked-upload request for one chunk.
#[allow(dead_code)]
pub fn chunk_request(
    item: UploadItem,
    upload_id: &str,
    index: u32,
    total: u32,
    offset: u64,
    size: u64,
    total_size: u64,
) -> UploadRequest {
    UploadRequest {
        chunk_fields: RawChunkFields {
            upload_id: Some(upload_id.to_string()),
            chunk_index: Some(index),
            chunk_byte_offset: Some(offset),
            total_chunk_count: Some(total),
            chunk_byte_size: Some(size),
            total_file_size: Some(total_size),
        },
        files: vec![item],
    }
}
