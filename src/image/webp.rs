//! WebP encoding via libwebp.

use image::RgbaImage;

use super::CodecError;

/// Effort used for lossless encoding (libwebp's own default).
const LOSSLESS_EFFORT: f32 = 75.0;

/// How a WebP variant is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebpMode {
    Lossless,
    /// Lossy at the given quality (1-100).
    Lossy(u8),
}

/// Encode RGBA pixels as WebP.
pub fn encode_webp(pixels: &RgbaImage, mode: WebpMode) -> Result<Vec<u8>, CodecError> {
    let encoder = ::webp::Encoder::from_rgba(pixels.as_raw(), pixels.width(), pixels.height());
    let memory = match mode {
        WebpMode::Lossless => encoder.encode_simple(true, LOSSLESS_EFFORT),
        WebpMode::Lossy(quality) => encoder.encode_simple(false, f32::from(quality)),
    }
    .map_err(|err| CodecError::WebP(format!("{err:?}")))?;

    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(16, 8, |x, y| Rgba([(x * 16) as u8, (y * 32) as u8, 128, 255]))
    }

    #[test]
    fn test_lossy_output_is_webp() {
        let bytes = encode_webp(&sample(), WebpMode::Lossy(80)).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn test_lossless_keeps_pixels() {
        let source = sample();
        let bytes = encode_webp(&source, WebpMode::Lossless).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded, source);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = encode_webp(&sample(), WebpMode::Lossy(60)).unwrap();
        let b = encode_webp(&sample(), WebpMode::Lossy(60)).unwrap();
        assert_eq!(a, b);
    }
}
