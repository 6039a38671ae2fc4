//! In-memory store for tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use super::{ObjectStore, StoreError};

/// Stored object body and content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<(String, String), StoredObject>>,
    puts: Cell<usize>,
    fail_after: Cell<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object without counting it as a put.
    pub fn insert(&self, bucket: &str, key: &str, body: impl Into<Vec<u8>>) {
        self.objects.borrow_mut().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: "application/octet-stream".to_string(),
            },
        );
    }

    /// Make every put after the first `n` successful ones fail.
    pub fn fail_puts_after(&self, n: usize) {
        self.fail_after.set(Some(n));
    }

    pub fn put_count(&self) -> usize {
        self.puts.get()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .borrow()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys in `bucket` starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, bucket: &str, prefix: &str) -> Vec<String> {
        self.objects
            .borrow()
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect()
    }
}

impl ObjectStore for MemoryStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        self.object(bucket, key)
            .map(|object| object.body)
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), StoreError> {
        if let Some(limit) = self.fail_after.get()
            && self.puts.get() >= limit
        {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "injected failure".to_string(),
            });
        }

        self.puts.set(self.puts.get() + 1);
        self.objects.borrow_mut().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
