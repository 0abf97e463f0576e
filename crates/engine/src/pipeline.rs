//! Request classification and end-to-end dispatch.

use crate::assembler::Assembler;
use crate::claims::AssemblyClaims;
use crate::completion::CompletionDetector;
use crate::error::EngineResult;
use crate::receiver::{FileReceiver, FinishedFile};
use crate::writer::ChunkWriter;
use bytes::Bytes;
use chute_core::{ChunkMeta, RawChunkFields, RequestKind, UploadConfig, UploadItem, UploadRequest};
use chute_store::{ByteStream, ChunkStore};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::instrument;

/// Read buffer size for spooled payload files (64 KiB).
const PAYLOAD_READ_SIZE: usize = 64 * 1024;

/// Outcome of one upload request.
///
/// `files` is `None` while a chunked upload is still incomplete ("nothing
/// yet"); otherwise it holds the finished-file descriptors, possibly
/// alongside per-item errors for a partially failed multi-file request.
/// Descriptors and "nothing yet" never mix.
#[derive(Debug, Default)]
pub struct UploadOutcome {
    /// Finished-file descriptors, or `None` for an in-progress upload.
    pub files: Option<Vec<FinishedFile>>,
    /// Caller-facing error messages, one per failed item or chunk.
    pub errors: Vec<String>,
}

impl UploadOutcome {
    /// Whether the chunk was accepted but the upload is not yet complete.
    pub fn is_pending(&self) -> bool {
        self.files.is_none() && self.errors.is_empty()
    }
}

/// Entry point of the reassembly engine: classifies an upload request and
/// drives it to an outcome.
///
/// The pipeline holds no per-upload state in memory beyond the assembly
/// claim registry; all coordination state lives in the chunk store as file
/// existence.
pub struct UploadPipeline {
    store: Arc<dyn ChunkStore>,
    writer: ChunkWriter,
    detector: CompletionDetector,
    assembler: Assembler,
    claims: AssemblyClaims,
    receiver: Arc<dyn FileReceiver>,
}

impl UploadPipeline {
    /// Create a pipeline over the given chunk store and file receiver.
    pub fn new(
        store: Arc<dyn ChunkStore>,
        receiver: Arc<dyn FileReceiver>,
        config: &UploadConfig,
    ) -> Self {
        Self {
            writer: ChunkWriter::new(store.clone(), config),
            detector: CompletionDetector::new(store.clone()),
            assembler: Assembler::new(store.clone()),
            claims: AssemblyClaims::new(),
            receiver,
            store,
        }
    }

    /// The chunk store this pipeline writes into.
    pub fn store(&self) -> &Arc<dyn ChunkStore> {
        &self.store
    }

    /// Handle one upload request end to end.
    ///
    /// Classification order is first match wins: a declared chunk index
    /// routes to the chunked path, a multi-payload file field to the
    /// multi-file path, anything else to the single-file path.
    #[instrument(skip(self, request))]
    pub async fn handle(&self, request: &UploadRequest) -> UploadOutcome {
        match request.classify() {
            RequestKind::Chunk(fields, payload) => self.handle_chunk(fields, payload).await,
            RequestKind::MultiFile(items) => self.handle_multi(items).await,
            RequestKind::SingleFile(item) => self.handle_single(item).await,
        }
    }

    /// Default one-file-per-request path: hand the payload straight to the
    /// receiver.
    async fn handle_single(&self, item: Option<&UploadItem>) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();
        let Some(item) = item else {
            outcome.files = Some(Vec::new());
            outcome
                .errors
                .push(chute_core::Error::MissingPayload.to_string());
            return outcome;
        };

        match self.receiver.receive(item).await {
            Ok(file) => outcome.files = Some(vec![file]),
            Err(message) => {
                outcome.files = Some(Vec::new());
                outcome.errors.push(message);
            }
        }
        outcome
    }

    /// Multi-file path: every payload is processed independently in
    /// submission order; a failing item never aborts its siblings.
    async fn handle_multi(&self, items: &[UploadItem]) -> UploadOutcome {
        let mut files = Vec::new();
        let mut errors = Vec::new();
        for item in items {
            match self.receiver.receive(item).await {
                Ok(file) => files.push(file),
                Err(message) => errors.push(message),
            }
        }
        UploadOutcome {
            files: Some(files),
            errors,
        }
    }

    /// Chunked path: persist the chunk, check for completion, and on the
    /// final chunk assemble and finalize the upload.
    async fn handle_chunk(
        &self,
        fields: &RawChunkFields,
        payload: Option<&UploadItem>,
    ) -> UploadOutcome {
        let mut outcome = UploadOutcome::default();

        // Required-field validation aborts this chunk before any write.
        let meta = match ChunkMeta::from_fields(fields) {
            Ok(meta) => meta,
            Err(e) => {
                outcome.errors.push(e.to_string());
                return outcome;
            }
        };
        let Some(item) = payload else {
            outcome
                .errors
                .push(chute_core::Error::MissingPayload.to_string());
            return outcome;
        };

        if let Err(e) = self.write_chunk_payload(&meta, item).await {
            outcome.errors.push(e.to_string());
            return outcome;
        }

        let complete = match self
            .detector
            .is_complete(&meta.upload_id, meta.total_chunk_count)
            .await
        {
            Ok(complete) => complete,
            Err(e) => {
                outcome.errors.push(e.to_string());
                return outcome;
            }
        };
        if !complete {
            // Chunk accepted; the client keeps sending.
            return outcome;
        }

        // Concurrent last-chunk arrivals can all observe completion; only
        // the claim holder assembles. Everyone else reports "nothing yet".
        let Some(claim) = self.claims.begin(&meta.upload_id) else {
            tracing::warn!(
                upload_id = %meta.upload_id,
                "upload already being finalized, chunk accepted"
            );
            return outcome;
        };

        // The merged file lands at the triggering request's temp path, so
        // the finalization path is identical to a non-chunked upload.
        let bytes_written = match self
            .assembler
            .assemble(&meta.upload_id, meta.total_chunk_count, &item.temp_path)
            .await
        {
            Ok(n) => n,
            Err(e) => {
                // Claim released on drop; a client retry can re-trigger.
                outcome.errors.push(e.to_string());
                return outcome;
            }
        };
        claim.settle();
        tracing::info!(
            upload_id = %meta.upload_id,
            chunks = meta.total_chunk_count,
            bytes = bytes_written,
            "upload assembled"
        );

        let merged = UploadItem {
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
            temp_path: item.temp_path.clone(),
            declared_size: meta.total_file_size,
        };
        match self.receiver.receive(&merged).await {
            Ok(file) => outcome.files = Some(vec![file]),
            Err(message) => {
                outcome.files = Some(Vec::new());
                outcome.errors.push(message);
            }
        }
        outcome
    }

    /// Open the spooled payload and copy it into the chunk store at the
    /// chunk's byte offset.
    async fn write_chunk_payload(&self, meta: &ChunkMeta, item: &UploadItem) -> EngineResult<u64> {
        let payload = file_payload(&item.temp_path).await?;
        self.writer.write_chunk(meta, payload).await
    }
}

/// Stream a spooled payload file from disk.
async fn file_payload(path: &Path) -> EngineResult<ByteStream> {
    let file = tokio::fs::File::open(path).await?;
    let stream = async_stream::try_stream! {
        let mut file = file;
        let mut buf = vec![0u8; PAYLOAD_READ_SIZE];
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
