//! Upload request shapes and classification.

use crate::chunk::RawChunkFields;
use std::path::PathBuf;

/// One file payload of an upload request, already spooled to a temp file
/// by the surrounding framework.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadItem {
    /// Original client-side filename.
    pub name: String,
    /// Declared mime type.
    pub mime_type: String,
    /// Where the raw payload bytes were spooled.
    pub temp_path: PathBuf,
    /// Declared payload size in bytes.
    pub declared_size: u64,
}

/// An incoming upload request after field extraction, before dispatch.
#[derive(Clone, Debug, Default)]
pub struct UploadRequest {
    /// Chunk metadata fields, if any were supplied.
    pub chunk_fields: RawChunkFields,
    /// The file payload(s) carried by the request.
    pub files: Vec<UploadItem>,
}

/// The three shapes an upload request can take. Classification order is
/// first match wins: a chunk index beats everything else, then a multi-file
/// payload, then the default one-file-per-request shape.
#[derive(Debug)]
pub enum RequestKind<'a> {
    /// One chunk of a chunked upload, with its payload if present.
    Chunk(&'a RawChunkFields, Option<&'a UploadItem>),
    /// Several files submitted in a single request.
    MultiFile(&'a [UploadItem]),
    /// A single file, or no payload at all.
    SingleFile(Option<&'a UploadItem>),
}

impl UploadRequest {
    /// Classify this request into one of the three dispatch paths.
    pub fn classify(&self) -> RequestKind<'_> {
        if self.chunk_fields.is_chunked() {
            RequestKind::Chunk(&self.chunk_fields, self.files.first())
        } else if self.files.len() > 1 {
            RequestKind::MultiFile(&self.files)
        } else {
            RequestKind::SingleFile(self.files.first())
        }
    }
}
