//! Vector sources.
//!
//! # Modules
//!
//! - [`size`]: aspect ratio and root `width`/`height` rewriting
//! - [`render`]: rasterization via resvg
//!
//! # Flow
//!
//! ```text
//! SVG bytes
//!     │
//!     ├──► vector copy (unmodified) ──► <base>-w<W>.svg
//!     │
//!     ▼
//! ┌──────┐   ratio, width/height = final size
//! │ size │
//! └──┬───┘
//!    ▼
//! ┌────────┐   render at max(base, W), resize to W × round(W·ratio)
//! │ render │ ──► <base>-w<W>.webp
//! └────────┘
//! ```

mod render;
pub mod size;

use std::borrow::Cow;

use image::imageops::{self, FilterType};

use super::CodecError;
use super::webp::{WebpMode, encode_webp};
use crate::config::{EncodeConfig, VectorConfig, VectorWebp};

pub use render::rasterize;

/// Everything needed to emit the two variants of one width.
#[derive(Debug)]
pub struct PreparedSvg<'a> {
    /// Source bytes, emitted as-is.
    pub vector_copy: &'a [u8],
    /// Markup with the root sized to the final target, rendered at `raster_width`.
    pub raster_markup: Cow<'a, str>,
    pub raster_width: u32,
    pub target_width: u32,
    pub target_height: u32,
}

/// Compute sizes and rewrite the root element for one target width.
///
/// Missing or malformed size hints fall back to a square drawing.
pub fn prepare(
    source: &[u8],
    target_width: u32,
    base_minimum: u32,
) -> Result<PreparedSvg<'_>, CodecError> {
    let markup = std::str::from_utf8(source)?;
    let ratio = size::aspect_ratio(markup);

    let target_height = scale(target_width, ratio);

    Ok(PreparedSvg {
        vector_copy: source,
        raster_markup: size::rewrite_size(markup, target_width, target_height),
        raster_width: base_minimum.max(target_width),
        target_width,
        target_height,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(width: u32, ratio: f64) -> u32 {
    (f64::from(width) * ratio).round().max(1.0) as u32
}

/// Both variants for one target width of a vector source.
#[derive(Debug)]
pub struct EncodedSvg {
    pub vector: Vec<u8>,
    pub webp: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct VectorEncoder {
    base_width: u32,
    webp_mode: WebpMode,
}

impl VectorEncoder {
    pub fn new(vector: &VectorConfig, encode: &EncodeConfig) -> Self {
        let webp_mode = match vector.webp {
            VectorWebp::Lossless => WebpMode::Lossless,
            VectorWebp::Lossy => WebpMode::Lossy(encode.webp_quality),
        };
        Self {
            base_width: vector.base_width,
            webp_mode,
        }
    }

    pub fn encode(&self, source: &[u8], target_width: u32) -> Result<EncodedSvg, CodecError> {
        let prepared = prepare(source, target_width, self.base_width)?;
        let pixels = rasterize(&prepared.raster_markup, prepared.raster_width)?;

        let (width, height) = (prepared.target_width, prepared.target_height);
        let resized = imageops::resize(&pixels, width, height, FilterType::Lanczos3);

        Ok(EncodedSvg {
            vector: prepared.vector_copy.to_vec(),
            webp: encode_webp(&resized, self.webp_mode)?,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50"><rect width="100" height="50" fill="#0a0"/></svg>"##;

    fn encoder(webp: VectorWebp) -> VectorEncoder {
        let vector = VectorConfig {
            webp,
            ..VectorConfig::default()
        };
        VectorEncoder::new(&vector, &EncodeConfig::default())
    }

    #[test]
    fn test_prepare_sizes() {
        let prepared = prepare(WIDE, 400, 1200).unwrap();
        assert_eq!(prepared.raster_width, 1200);
        assert_eq!(prepared.target_height, 200);
        assert_eq!(prepared.vector_copy, WIDE);
        assert!(prepared.raster_markup.contains(r#"width="400" height="200""#));
        assert!(!prepared.raster_markup.contains("1200"));
    }

    #[test]
    fn test_raster_width_never_below_base() {
        for (target, base, expected) in [(50, 1200, 1200), (1200, 1200, 1200), (1600, 1200, 1600)] {
            assert_eq!(prepare(WIDE, target, base).unwrap().raster_width, expected);
        }
    }

    #[test]
    fn test_prepare_writes_final_size_only() {
        let source = br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50"/></svg>"#;
        let prepared = prepare(source, 400, 1200).unwrap();
        assert_eq!(
            prepared.raster_markup,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="200"><rect width="100" height="50"/></svg>"#
        );
        assert_eq!(prepared.raster_width, 1200);
    }

    #[test]
    fn test_prepare_without_hints_is_square() {
        let source = br#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#;
        let prepared = prepare(source, 100, 1200).unwrap();
        assert_eq!(prepared.target_height, 100);
    }

    #[test]
    fn test_prepare_rejects_non_utf8() {
        assert!(matches!(
            prepare(&[0xff, 0xfe, 0x00], 100, 1200),
            Err(CodecError::Utf8(_))
        ));
    }

    #[test]
    fn test_encode_scenario() {
        let encoded = encoder(VectorWebp::Lossless).encode(WIDE, 400).unwrap();
        assert_eq!(encoded.vector, WIDE);
        assert_eq!((encoded.width, encoded.height), (400, 200));

        let webp = image::load_from_memory(&encoded.webp).unwrap();
        assert_eq!((webp.width(), webp.height()), (400, 200));
    }

    #[test]
    fn test_encode_lossy_mode() {
        let encoded = encoder(VectorWebp::Lossy).encode(WIDE, 50).unwrap();
        assert_eq!((encoded.width, encoded.height), (50, 25));
        assert_eq!(&encoded.webp[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = encoder(VectorWebp::Lossless);
        let a = encoder.encode(WIDE, 100).unwrap();
        let b = encoder.encode(WIDE, 100).unwrap();
        assert_eq!(a.webp, b.webp);
    }
}
