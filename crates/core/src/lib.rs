//! Core domain types and shared logic for the chute upload engine.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Upload identifiers supplied by clients
//! - Chunk metadata fields and their validation
//! - Request shapes (single file, multiple files, chunk) and classification
//! - Upload policy and chunk store configuration

pub mod chunk;
pub mod config;
pub mod error;
pub mod request;
pub mod upload;

pub use chunk::{ChunkMeta, RawChunkFields};
pub use config::{StoreConfig, UploadConfig};
pub use error::{Error, Result};
pub use request::{RequestKind, UploadItem, UploadRequest};
pub use upload::UploadId;

/// Default maximum accepted size for a single chunk or file: 2 GiB.
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Maximum length of a client-supplied upload identifier.
pub const MAX_UPLOAD_ID_LEN: usize = 128;
