//! Chunked-upload reassembly pipeline for chute.
//!
//! Accepts file data submitted as one whole file, as multiple files in one
//! request, or as byte-range chunks across many requests, and produces a
//! single correctly ordered file once all chunks have arrived. Coordination
//! state lives entirely in the chunk store as file existence; completion is
//! inferred, never signalled.
//!
//! The pipeline stops at the [`FileReceiver`] boundary: policy enforcement
//! on the finished file and permanent persistence belong to the embedding
//! application.

pub mod assembler;
pub mod claims;
pub mod completion;
pub mod error;
pub mod pipeline;
pub mod receiver;
pub mod writer;

pub use assembler::Assembler;
pub use claims::{AssemblyClaim, AssemblyClaims};
pub use completion::CompletionDetector;
pub use error::{EngineError, EngineResult};
pub use pipeline::{UploadOutcome, UploadPipeline};
pub use receiver::{FileReceiver, FinishedFile};
pub use writer::ChunkWriter;
