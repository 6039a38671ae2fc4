//! Object store boundary.
//!
//! The pipeline only needs byte-level `get` and `put`. Backends:
//!
//! - [`FsStore`]: local directory, one subdirectory per bucket
//! - `MemoryStore` (tests only): in-memory map with failure injection

mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsStore;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object `{key}` not found in bucket `{bucket}`")]
    NotFound { bucket: String, key: String },

    #[error("invalid object location `{bucket}/{key}`")]
    InvalidKey { bucket: String, key: String },

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("store rejected write of `{key}`: {reason}")]
    Rejected { key: String, reason: String },
}

/// Byte-level access to the object store.
pub trait ObjectStore {
    /// Fetch the full object body.
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Write an object, replacing any existing one.
    fn put(&self, bucket: &str, key: &str, body: &[u8], content_type: &str)
    -> Result<(), StoreError>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        (**self).get(bucket, key)
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError> {
        (**self).put(bucket, key, body, content_type)
    }
}
