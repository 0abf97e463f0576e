//! The external storage/finalize collaborator boundary.

use async_trait::async_trait;
use chute_core::UploadItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Descriptor of a file the receiver has validated and stored permanently.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedFile {
    /// Receiver-assigned identifier for the stored file.
    pub id: Uuid,
    /// Original client-side filename.
    pub filename: String,
    /// Stored size in bytes.
    pub size: u64,
}

/// Storage/finalize collaborator for completed uploads.
///
/// The pipeline hands over a finished temp file exactly once per completed
/// logical file: once per non-chunked item, and once per fully assembled
/// chunked upload. The receiver owns policy enforcement on the finished
/// file (size and type limits) and permanent persistence; the temp file
/// belongs to the receiver after a successful call.
#[async_trait]
pub trait FileReceiver: Send + Sync + 'static {
    /// Validate and persist one finished temp file.
    ///
    /// Returns a descriptor on success, or a caller-facing message when
    /// policy rejects the file. The pipeline surfaces that message to its
    /// own caller unchanged.
    async fn receive(&self, item: &UploadItem) -> Result<FinishedFile, String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_file_serializes_with_plain_field_names() {
        let file = FinishedFile {
            id: Uuid::nil(),
            filename: "report.pdf".to_string(),
            size: 1024,
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["filename"], "report.pdf");
        assert_eq!(json["size"], 1024);
        let back: FinishedFile = serde_json::from_value(json).unwrap();
        assert_eq!(back, file);
    }
}
