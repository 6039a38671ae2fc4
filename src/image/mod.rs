//! Image encoding.
//!
//! # Modules
//!
//! - [`raster`]: resize without upscaling, original-format + WebP encoding
//! - [`svg`]: size-attribute rewriting and rasterization of vector sources
//! - `webp`: shared WebP encoder (lossy or lossless)

pub mod raster;
pub mod svg;
mod webp;

pub use raster::{RasterEncoder, RasterFormat};
pub use svg::VectorEncoder;

use thiserror::Error;

/// Errors raised while decoding, rendering or encoding a single object.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to decode image")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode {0}")]
    Encode(&'static str, #[source] image::ImageError),

    #[error("webp encoding failed: {0}")]
    WebP(String),

    #[error("vector markup is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("failed to parse SVG")]
    Svg(#[from] usvg::Error),

    #[error("invalid render size {0}x{1}")]
    Canvas(u32, u32),
}
