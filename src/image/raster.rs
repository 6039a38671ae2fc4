//! Raster variant encoding.
//!
//! Each target width yields an original-format buffer and an independently
//! encoded WebP buffer, both from the same resized pixels.

use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};

use super::CodecError;
use super::webp::{WebpMode, encode_webp};
use crate::config::EncodeConfig;

/// Encoding used for the original-format variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

/// Both encodings for one target width.
#[derive(Debug)]
pub struct EncodedPair {
    pub original: Vec<u8>,
    pub webp: Vec<u8>,
    /// Actual pixel size after clamping.
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct RasterEncoder {
    jpeg_quality: u8,
    webp_quality: u8,
    png_compression: CompressionType,
}

impl RasterEncoder {
    pub fn new(config: &EncodeConfig) -> Self {
        Self {
            jpeg_quality: config.jpeg_quality,
            webp_quality: config.webp_quality,
            png_compression: png_compression(config.png_compression),
        }
    }

    /// Decode a raster source once; the result is reused for every width.
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        image::load_from_memory(bytes).map_err(CodecError::Decode)
    }

    /// Pixel size from the header alone.
    pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), CodecError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|err| CodecError::Decode(err.into()))?
            .into_dimensions()
            .map_err(CodecError::Decode)
    }

    /// Resize (never upscaling) and encode both variants.
    pub fn encode(
        &self,
        source: &DynamicImage,
        target_width: u32,
        format: RasterFormat,
    ) -> Result<EncodedPair, CodecError> {
        let resized = resize_no_upscale(source, target_width);

        let original = match format {
            RasterFormat::Jpeg => self.encode_jpeg(&resized)?,
            RasterFormat::Png => self.encode_png(&resized)?,
        };
        let webp = encode_webp(&resized.to_rgba8(), WebpMode::Lossy(self.webp_quality))?;

        Ok(EncodedPair {
            original,
            webp,
            width: resized.width(),
            height: resized.height(),
        })
    }

    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Vec<u8>, CodecError> {
        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality)
            .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
            .map_err(|err| CodecError::Encode("jpeg", err))?;
        Ok(buf)
    }

    fn encode_png(&self, img: &DynamicImage) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buf, self.png_compression, PngFilter::Adaptive);

        let result = if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            encoder.write_image(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )
        } else {
            let rgb = img.to_rgb8();
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        };
        result.map_err(|err| CodecError::Encode("png", err))?;
        Ok(buf)
    }
}

/// Map a 0-9 compression level onto the encoder presets.
fn png_compression(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Scale to `target_width` keeping the aspect ratio. Never upscales.
fn resize_no_upscale(source: &DynamicImage, target_width: u32) -> Cow<'_, DynamicImage> {
    let (native_w, native_h) = (source.width(), source.height());
    let width = target_width.min(native_w);
    if width == native_w || native_w == 0 {
        return Cow::Borrowed(source);
    }

    let height = scaled_height(native_w, native_h, width);
    Cow::Owned(source.resize_exact(width, height, FilterType::Lanczos3))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_height(native_w: u32, native_h: u32, width: u32) -> u32 {
    let height = (f64::from(native_h) * f64::from(width) / f64::from(native_w)).round();
    (height as u32).max(1)
}
