//! Pipeline error types.
//!
//! Skips (unsupported input, allow-list mismatch, already-resized keys) are
//! not errors; they are reported through [`crate::pipeline::Outcome`]. Every
//! variant here fails the whole invocation so the delivery queue redelivers
//! the batch.

use thiserror::Error;

use crate::image::CodecError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Batch or notification body that cannot be parsed, or lacks bucket/key.
    #[error("malformed batch: {0}")]
    MalformedBatch(String),

    /// Retrieval or write against the object store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Source could not be decoded, rendered or re-encoded.
    #[error("failed to process `{key}`")]
    Codec {
        key: String,
        #[source]
        source: CodecError,
    },
}

impl ProcessError {
    pub fn codec(key: &str, source: CodecError) -> Self {
        Self::Codec {
            key: key.to_string(),
            source,
        }
    }
}
