//! Chunk metadata fields and validation.

use crate::upload::UploadId;
use serde::Deserialize;

/// Chunk metadata fields as they arrive on a request, before validation.
///
/// Every field is optional at this stage; `chunk_index` doubles as the
/// marker that a request belongs to a chunked upload at all.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawChunkFields {
    pub upload_id: Option<String>,
    pub chunk_index: Option<u32>,
    pub chunk_byte_offset: Option<u64>,
    pub total_chunk_count: Option<u32>,
    pub chunk_byte_size: Option<u64>,
    pub total_file_size: Option<u64>,
}

impl RawChunkFields {
    /// Whether the request declares a chunk index (the chunked-path marker).
    pub fn is_chunked(&self) -> bool {
        self.chunk_index.is_some()
    }
}

/// Validated metadata for one chunk of a chunked upload.
///
/// `total_chunk_count` and `total_file_size` are supplied redundantly on
/// every chunk; the engine trusts whichever values arrive with the chunk
/// that triggers completion and does not reconcile mismatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkMeta {
    /// Groups the chunks of one logical upload.
    pub upload_id: UploadId,
    /// Position of this chunk among `total_chunk_count`, 0-indexed.
    pub chunk_index: u32,
    /// Byte offset of this chunk's payload within the final file.
    pub chunk_byte_offset: u64,
    /// Number of chunks expected for the upload.
    pub total_chunk_count: u32,
    /// Byte length of this chunk's payload.
    pub chunk_byte_size: u64,
    /// Declared size of the fully assembled file.
    pub total_file_size: u64,
}

impl ChunkMeta {
    /// Validate raw request fields into chunk metadata.
    ///
    /// All six fields are required; the first missing one aborts the chunk
    /// with an error naming the field. The index must fall inside
    /// `[0, total_chunk_count)`.
    pub fn from_fields(fields: &RawChunkFields) -> crate::Result<Self> {
        let upload_id = fields
            .upload_id
            .as_deref()
            .ok_or(crate::Error::MissingChunkField("upload_id"))?;
        let chunk_byte_offset = fields
            .chunk_byte_offset
            .ok_or(crate::Error::MissingChunkField("chunk_byte_offset"))?;
        let chunk_index = fields
            .chunk_index
            .ok_or(crate::Error::MissingChunkField("chunk_index"))?;
        let total_chunk_count = fields
            .total_chunk_count
            .ok_or(crate::Error::MissingChunkField("total_chunk_count"))?;
        let chunk_byte_size = fields
            .chunk_byte_size
            .ok_or(crate::Error::MissingChunkField("chunk_byte_size"))?;
        let total_file_size = fields
            .total_file_size
            .ok_or(crate::Error::MissingChunkField("total_file_size"))?;

        let upload_id = UploadId::parse(upload_id)?;
        if total_chunk_count == 0 {
            return Err(crate::Error::InvalidChunkCount);
        }
        if chunk_index >= total_chunk_count {
            return Err(crate::Error::ChunkIndexOutOfRange {
                index: chunk_index,
                total: total_chunk_count,
            });
        }

        Ok(Self {
            upload_id,
            chunk_index,
            chunk_byte_offset,
            total_chunk_count,
            chunk_byte_size,
            total_file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_fields() -> RawChunkFields {
        RawChunkFields {
            upload_id: Some("upload-1".to_string()),
            chunk_index: Some(1),
            chunk_byte_offset: Some(64),
            total_chunk_count: Some(3),
            chunk_byte_size: Some(64),
            total_file_size: Some(192),
        }
    }

    #[test]
    fn test_from_fields_complete() {
        let meta = ChunkMeta::from_fields(&complete_fields()).unwrap();
        assert_eq!(meta.upload_id.as_str(), "upload-1");
        assert_eq!(meta.chunk_index, 1);
        assert_eq!(meta.chunk_byte_offset, 64);
        assert_eq!(meta.total_chunk_count, 3);
        assert_eq!(meta.chunk_byte_size, 64);
        assert_eq!(meta.total_file_size, 192);
    }

    #[test]
    fn test_from_fields_names_each_missing_field() {
        let cases: [(&str, fn(&mut RawChunkFields)); 6] = [
            ("upload_id", |f| f.upload_id = None),
            ("chunk_index", |f| f.chunk_index = None),
            ("chunk_byte_offset", |f| f.chunk_byte_offset = None),
            ("total_chunk_count", |f| f.total_chunk_count = None),
            ("chunk_byte_size", |f| f.chunk_byte_size = None),
            ("total_file_size", |f| f.total_file_size = None),
        ];
        for (name, clear) in cases {
            let mut fields = complete_fields();
            clear(&mut fields);
            match ChunkMeta::from_fields(&fields) {
                Err(crate::Error::MissingChunkField(field)) => assert_eq!(field, name),
                other => panic!("expected MissingChunkField({name}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_fields_rejects_zero_chunk_count() {
        let mut fields = complete_fields();
        fields.chunk_index = Some(0);
        fields.total_chunk_count = Some(0);
        assert_eq!(
            ChunkMeta::from_fields(&fields),
            Err(crate::Error::InvalidChunkCount)
        );
    }

    #[test]
    fn test_from_fields_rejects_out_of_range_index() {
        let mut fields = complete_fields();
        fields.chunk_index = Some(3);
        assert_eq!(
            ChunkMeta::from_fields(&fields),
            Err(crate::Error::ChunkIndexOutOfRange { index: 3, total: 3 })
        );
    }

    #[test]
    fn test_is_chunked_marker() {
        assert!(complete_fields().is_chunked());
        assert!(!RawChunkFields::default().is_chunked());
    }
}
