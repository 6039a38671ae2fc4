//! Inbound notification batches.
//!
//! A delivery-queue batch carries one or more records whose `body` is a
//! JSON-encoded storage change notification:
//!
//! ```text
//! QueueBatch { Records: [ QueueRecord { body: "<json>" } ] }
//!                                            │
//!                                            ▼
//!            StorageEvent { Records: [ { s3: { bucket: { name }, object: { key } } } ] }
//! ```
//!
//! Only the bucket name and the object key are extracted. Keys arrive
//! URL-encoded with `+` standing for a space.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

use crate::error::ProcessError;

/// Batch handed over by the delivery queue.
#[derive(Debug, Deserialize)]
pub struct QueueBatch {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueRecord>,
}

#[derive(Debug, Deserialize)]
pub struct QueueRecord {
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
    pub body: String,
}

/// Storage change notification. Test events carry no `Records`.
#[derive(Debug, Deserialize)]
struct StorageEvent {
    #[serde(rename = "Records", default)]
    records: Vec<StorageRecord>,
}

#[derive(Debug, Deserialize)]
struct StorageRecord {
    s3: StorageEntity,
}

#[derive(Debug, Deserialize)]
struct StorageEntity {
    bucket: StorageBucket,
    object: StorageObject,
}

#[derive(Debug, Deserialize)]
struct StorageBucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct StorageObject {
    key: String,
}

/// A decoded (bucket, key) pair ready for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl QueueBatch {
    /// Parse a batch from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, ProcessError> {
        serde_json::from_str(content)
            .map_err(|err| ProcessError::MalformedBatch(format!("invalid batch: {err}")))
    }
}

impl QueueRecord {
    /// Extract every object referenced by this record, in order.
    pub fn objects(&self) -> Result<Vec<ObjectRef>, ProcessError> {
        let event: StorageEvent = serde_json::from_str(&self.body).map_err(|err| {
            ProcessError::MalformedBatch(format!(
                "record {}: {err}",
                self.message_id.as_deref().unwrap_or("<unknown>")
            ))
        })?;

        event
            .records
            .into_iter()
            .map(|record| {
                let StorageEntity { bucket, object } = record.s3;
                if bucket.name.is_empty() || object.key.is_empty() {
                    return Err(ProcessError::MalformedBatch(
                        "notification without bucket or key".to_string(),
                    ));
                }
                Ok(ObjectRef::new(bucket.name, decode_key(&object.key)?))
            })
            .collect()
    }
}

/// Decode a notification key: `+` is a space, then percent-decoding.
pub fn decode_key(raw: &str) -> Result<String, ProcessError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| ProcessError::MalformedBatch(format!("key `{raw}` is not valid UTF-8")))
}
