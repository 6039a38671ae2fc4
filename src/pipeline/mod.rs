//! Variant pipeline.
//!
//! Turns one source object into its fixed matrix of width variants.
//!
//! # Architecture
//!
//! ```text
//! ObjectRef
//!     │
//!     ▼
//! ┌───────┐  skip: already-resized / not-whitelisted
//! │ route │ ─────────────────────────────────────────►
//! └───┬───┘
//!     ▼  store.get
//! ┌────────┐  skip: unsupported-extension
//! │ format │ ─────────────────────────────────────────►
//! └───┬────┘
//!     ▼
//! ┌──────┐   one WidthTarget per listed width
//! │ plan │
//! └──┬───┘
//!    ▼  per width
//! ┌──────────────────────┐   ┌─────┐
//! │ RasterEncoder        │──►│ key │──► store.put × 2
//! │ or VectorEncoder     │   └─────┘
//! └──────────────────────┘
//! ```
//!
//! Everything runs sequentially. Variants are written as soon as they are
//! encoded; the first failure aborts the batch and earlier writes remain.

mod format;
mod key;
mod plan;
mod route;
mod variant;

pub use format::{SourceFormat, resolve, sniff};
pub use key::{KeyParts, build_key};
pub use plan::{WidthTarget, plan};
pub use route::{Route, route};
pub use variant::{Outcome, ProcessingResult, SkipReason, Variant, VariantKind, VariantRecord};

use crate::config::{ResizeConfig, RouteConfig};
use crate::error::ProcessError;
use crate::event::{ObjectRef, QueueBatch};
use crate::image::{RasterEncoder, RasterFormat, VectorEncoder};
use crate::store::ObjectStore;
use crate::utils::mime;
use crate::{debug, log};

/// A routed and resolved source, body loaded.
struct SourceObject<'a> {
    object: &'a ObjectRef,
    section: &'a str,
    parts: KeyParts<'a>,
    format: SourceFormat,
    body: Vec<u8>,
}

enum Loaded<'a> {
    Source(SourceObject<'a>),
    Skip(SkipReason),
}

/// Dry-run view of one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Skipped(SkipReason),
    Planned {
        format: SourceFormat,
        /// 0 for vector sources.
        native_width: u32,
        widths: Vec<PlannedWidth>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWidth {
    pub target: WidthTarget,
    pub variants: Vec<(VariantKind, String)>,
}

pub struct Pipeline<S> {
    store: S,
    root: String,
    widths: Vec<u32>,
    route: RouteConfig,
    raster: RasterEncoder,
    vector: VectorEncoder,
}

impl<S: ObjectStore> Pipeline<S> {
    pub fn new(config: &ResizeConfig, store: S) -> Self {
        Self {
            store,
            root: config.output.root().to_string(),
            widths: config.output.widths.clone(),
            route: config.route.clone(),
            raster: RasterEncoder::new(&config.encode),
            vector: VectorEncoder::new(&config.vector, &config.encode),
        }
    }

    /// Process every object of every record, in order.
    ///
    /// Fails as a whole on the first error so the batch can be redelivered.
    pub fn process_batch(
        &self,
        batch: &QueueBatch,
    ) -> Result<Vec<ProcessingResult>, ProcessError> {
        let mut results = Vec::new();
        for record in &batch.records {
            for object in record.objects()? {
                results.push(self.process_object(&object)?);
            }
        }
        Ok(results)
    }

    pub fn process_object(&self, object: &ObjectRef) -> Result<ProcessingResult, ProcessError> {
        let source = match self.load(object)? {
            Loaded::Source(source) => source,
            Loaded::Skip(reason) => {
                log!("skip"; "{}/{}: {}", object.bucket, object.key, reason);
                return Ok(ProcessingResult::skipped(object, reason));
            }
        };

        let records = match source.format.raster() {
            Some(format) => self.emit_raster(&source, format)?,
            None => self.emit_vector(&source)?,
        };

        log!(
            "resize";
            "{}/{} ({}) -> {} variants",
            object.bucket,
            object.key,
            source.format,
            records.len()
        );
        Ok(ProcessingResult {
            object: object.clone(),
            outcome: Outcome::Processed(records),
        })
    }

    /// Route, resolve and plan one object without encoding or writing.
    pub fn inspect(&self, object: &ObjectRef) -> Result<Inspection, ProcessError> {
        let source = match self.load(object)? {
            Loaded::Source(source) => source,
            Loaded::Skip(reason) => return Ok(Inspection::Skipped(reason)),
        };

        let native_width = match source.format.raster() {
            Some(_) => {
                RasterEncoder::dimensions(&source.body)
                    .map_err(|err| ProcessError::codec(&object.key, err))?
                    .0
            }
            None => 0,
        };

        let widths = plan(&self.widths, native_width)
            .into_iter()
            .map(|target| PlannedWidth {
                target,
                variants: variant_kinds(source.format)
                    .into_iter()
                    .map(|(kind, ext)| (kind, self.variant_key(&source, target.requested, ext)))
                    .collect(),
            })
            .collect();

        Ok(Inspection::Planned {
            format: source.format,
            native_width,
            widths,
        })
    }

    fn load<'a>(&self, object: &'a ObjectRef) -> Result<Loaded<'a>, ProcessError> {
        let (section, remainder) = match route(&object.key, &self.root, &self.route) {
            Route::Routed { section, remainder } => (section, remainder),
            Route::Skip(reason) => return Ok(Loaded::Skip(reason)),
        };

        let parts = KeyParts::split(remainder);
        let body = self.store.get(&object.bucket, &object.key)?;

        let Some(format) = resolve(parts.extension, sniff(&body)) else {
            return Ok(Loaded::Skip(SkipReason::UnsupportedExtension));
        };
        debug!("resolve"; "{} -> {} ({} bytes)", object.key, format, body.len());

        Ok(Loaded::Source(SourceObject {
            object,
            section,
            parts,
            format,
            body,
        }))
    }

    fn emit_raster(
        &self,
        source: &SourceObject<'_>,
        format: RasterFormat,
    ) -> Result<Vec<VariantRecord>, ProcessError> {
        let key = &source.object.key;
        let image =
            RasterEncoder::decode(&source.body).map_err(|err| ProcessError::codec(key, err))?;

        let mut records = Vec::with_capacity(self.widths.len() * 2);
        for target in plan(&self.widths, image.width()) {
            let pair = self
                .raster
                .encode(&image, target.clamped, format)
                .map_err(|err| ProcessError::codec(key, err))?;
            let pixel_size = (pair.width, pair.height);

            let payloads = [
                (VariantKind::OriginalFormat, pair.original),
                (VariantKind::Webp, pair.webp),
            ];
            for (kind, payload) in payloads {
                let variant = self.variant(source, kind, target.requested, pixel_size, payload);
                records.push(self.write(&source.object.bucket, variant)?);
            }
        }
        Ok(records)
    }

    fn emit_vector(&self, source: &SourceObject<'_>) -> Result<Vec<VariantRecord>, ProcessError> {
        let key = &source.object.key;

        let mut records = Vec::with_capacity(self.widths.len() * 2);
        for target in plan(&self.widths, 0) {
            let encoded = self
                .vector
                .encode(&source.body, target.clamped)
                .map_err(|err| ProcessError::codec(key, err))?;
            let pixel_size = (encoded.width, encoded.height);

            let payloads = [
                (VariantKind::VectorCopy, encoded.vector),
                (VariantKind::Webp, encoded.webp),
            ];
            for (kind, payload) in payloads {
                let variant = self.variant(source, kind, target.requested, pixel_size, payload);
                records.push(self.write(&source.object.bucket, variant)?);
            }
        }
        Ok(records)
    }

    fn variant(
        &self,
        source: &SourceObject<'_>,
        kind: VariantKind,
        width: u32,
        pixel_size: (u32, u32),
        payload: Vec<u8>,
    ) -> Variant {
        let ext = match kind {
            VariantKind::Webp => "webp",
            VariantKind::OriginalFormat | VariantKind::VectorCopy => source.format.extension(),
        };
        Variant {
            kind,
            width,
            pixel_size,
            key: self.variant_key(source, width, ext),
            content_type: mime::from_extension(ext),
            payload,
        }
    }

    fn variant_key(&self, source: &SourceObject<'_>, width: u32, ext: &str) -> String {
        build_key(&self.root, source.section, source.parts.directory, source.parts.base, width, ext)
    }

    fn write(&self, bucket: &str, variant: Variant) -> Result<VariantRecord, ProcessError> {
        self.store.put(bucket, &variant.key, &variant.payload, variant.content_type)?;
        debug!(
            "put";
            "{} ({}, {} bytes)",
            variant.key,
            variant.content_type,
            variant.payload.len()
        );
        Ok(variant.record())
    }
}

/// The two variant kinds emitted per width, with their extensions.
fn variant_kinds(format: SourceFormat) -> [(VariantKind, &'static str); 2] {
    match format.raster() {
        Some(_) => [(VariantKind::OriginalFormat, format.extension()), (VariantKind::Webp, "webp")],
        None => [(VariantKind::VectorCopy, format.extension()), (VariantKind::Webp, "webp")],
    }
}
