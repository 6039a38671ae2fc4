//! Variants and per-object results.

use std::fmt;

use crate::event::ObjectRef;

/// What a variant holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Re-encoded in the source's own format.
    OriginalFormat,
    Webp,
    /// Unmodified copy of a vector source.
    VectorCopy,
}

impl VariantKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OriginalFormat => "original-format",
            Self::Webp => "webp",
            Self::VectorCopy => "vector-copy",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded variant waiting to be written.
#[derive(Debug)]
pub struct Variant {
    pub kind: VariantKind,
    /// Requested width, as it appears in the key.
    pub width: u32,
    /// Produced pixel size.
    pub pixel_size: (u32, u32),
    pub key: String,
    pub content_type: &'static str,
    pub payload: Vec<u8>,
}

impl Variant {
    /// Summary of this variant, without the payload.
    pub fn record(&self) -> VariantRecord {
        VariantRecord {
            kind: self.kind,
            width: self.width,
            pixel_size: self.pixel_size,
            key: self.key.clone(),
            content_type: self.content_type,
            bytes: self.payload.len(),
        }
    }
}

/// A written variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub kind: VariantKind,
    pub width: u32,
    pub pixel_size: (u32, u32),
    pub key: String,
    pub content_type: &'static str,
    pub bytes: usize,
}

/// Why an object produced no variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Key already lives under the destination root.
    AlreadyResized,
    /// Section is not in the allow-list.
    NotWhitelisted,
    /// Neither extension nor content is a supported format.
    UnsupportedExtension,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyResized => "already-resized",
            Self::NotWhitelisted => "not-whitelisted",
            Self::UnsupportedExtension => "unsupported-extension",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Processed(Vec<VariantRecord>),
    Skipped(SkipReason),
}

/// Result for one source object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub object: ObjectRef,
    pub outcome: Outcome,
}

impl ProcessingResult {
    pub fn skipped(object: &ObjectRef, reason: SkipReason) -> Self {
        Self {
            object: object.clone(),
            outcome: Outcome::Skipped(reason),
        }
    }

    /// Written variants; empty for skipped objects.
    pub fn variants(&self) -> &[VariantRecord] {
        match &self.outcome {
            Outcome::Processed(records) => records,
            Outcome::Skipped(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(SkipReason::AlreadyResized.to_string(), "already-resized");
        assert_eq!(SkipReason::NotWhitelisted.to_string(), "not-whitelisted");
        assert_eq!(
            SkipReason::UnsupportedExtension.to_string(),
            "unsupported-extension"
        );
        assert_eq!(VariantKind::VectorCopy.to_string(), "vector-copy");
        assert_eq!(VariantKind::OriginalFormat.to_string(), "original-format");
    }

    #[test]
    fn test_record_drops_payload() {
        let variant = Variant {
            kind: VariantKind::Webp,
            width: 400,
            pixel_size: (300, 150),
            key: "resized/icons/logo-w400.webp".into(),
            content_type: "image/webp",
            payload: vec![0; 42],
        };
        let record = variant.record();
        assert_eq!(record.bytes, 42);
        assert_eq!(record.width, 400);
        assert_eq!(record.pixel_size, (300, 150));
    }

    #[test]
    fn test_skipped_has_no_variants() {
        let result = ProcessingResult::skipped(
            &ObjectRef::new("media", "resized/a.png"),
            SkipReason::AlreadyResized,
        );
        assert!(result.variants().is_empty());
    }
}
