//! Source format resolution.
//!
//! A supported extension is authoritative. Otherwise the content decides:
//! magic bytes for raster formats, an `<svg` tag near the start for markup.

use std::fmt;

use image::ImageFormat;

use crate::image::RasterFormat;

/// How far into the (whitespace-stripped) body the `<svg` tag may appear.
const SVG_SNIFF_WINDOW: usize = 512;

/// Canonical working format of a source object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpg,
    Jpeg,
    Jfif,
    Svg,
}

impl SourceFormat {
    /// Match a supported extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "jfif" => Some(Self::Jfif),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Extension used for the original-format (or vector-copy) variant.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Jfif => "jfif",
            Self::Svg => "svg",
        }
    }

    /// Encoder for the original-format variant, `None` for vector sources.
    pub const fn raster(self) -> Option<RasterFormat> {
        match self {
            Self::Png => Some(RasterFormat::Png),
            Self::Jpg | Self::Jpeg | Self::Jfif => Some(RasterFormat::Jpeg),
            Self::Svg => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format detected from the object body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    Raster(ImageFormat),
    Svg,
}

/// Detect the body's format, `None` when nothing decodable is recognised.
pub fn sniff(body: &[u8]) -> Option<Sniffed> {
    if let Ok(format) = image::guess_format(body) {
        return format.reading_enabled().then_some(Sniffed::Raster(format));
    }
    looks_like_svg(body).then_some(Sniffed::Svg)
}

fn looks_like_svg(body: &[u8]) -> bool {
    let window: Vec<u8> = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .take(SVG_SNIFF_WINDOW)
        .collect();
    window
        .windows(4)
        .any(|w| w.eq_ignore_ascii_case(b"<svg"))
}

/// Reconcile the extension hint with the sniffed format.
pub fn resolve(extension_hint: &str, sniffed: Option<Sniffed>) -> Option<SourceFormat> {
    if let Some(format) = SourceFormat::from_extension(extension_hint) {
        return Some(format);
    }

    sniffed.map(|sniffed| match sniffed {
        Sniffed::Raster(ImageFormat::Jpeg) => SourceFormat::Jpeg,
        Sniffed::Raster(ImageFormat::Png) => SourceFormat::Png,
        Sniffed::Svg => SourceFormat::Svg,
        Sniffed::Raster(_) => SourceFormat::Jpg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF";
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\0\x01\0";

    #[test]
    fn test_sniff() {
        assert_eq!(sniff(PNG_MAGIC), Some(Sniffed::Raster(ImageFormat::Png)));
        assert_eq!(sniff(JPEG_MAGIC), Some(Sniffed::Raster(ImageFormat::Jpeg)));
        assert_eq!(sniff(GIF_MAGIC), Some(Sniffed::Raster(ImageFormat::Gif)));
        assert_eq!(
            sniff(b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            Some(Sniffed::Svg)
        );
        assert_eq!(sniff(b"hello world"), None);
        // recognised, but no decoder is built in
        assert_eq!(sniff(b"qoif\0\0\0\x01\0\0\0\x01\x04\0"), None);
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn test_sniff_svg_window() {
        let mut late = vec![b'x'; SVG_SNIFF_WINDOW];
        late.extend_from_slice(b"<svg/>");
        assert_eq!(sniff(&late), None);

        // whitespace does not count against the window
        let mut padded = vec![b' '; 4096];
        padded.extend_from_slice(b"<svg/>");
        assert_eq!(sniff(&padded), Some(Sniffed::Svg));
    }

    #[test]
    fn test_supported_hint_wins() {
        let sniffed = Some(Sniffed::Raster(ImageFormat::Png));
        assert_eq!(resolve("jfif", sniffed), Some(SourceFormat::Jfif));
        assert_eq!(resolve("JPG", sniffed), Some(SourceFormat::Jpg));
        assert_eq!(resolve("svg", None), Some(SourceFormat::Svg));
    }

    #[test]
    fn test_sniffed_mapping() {
        let cases = [
            (Some(Sniffed::Raster(ImageFormat::Jpeg)), Some(SourceFormat::Jpeg)),
            (Some(Sniffed::Raster(ImageFormat::Png)), Some(SourceFormat::Png)),
            (Some(Sniffed::Svg), Some(SourceFormat::Svg)),
            (Some(Sniffed::Raster(ImageFormat::Gif)), Some(SourceFormat::Jpg)),
            (Some(Sniffed::Raster(ImageFormat::WebP)), Some(SourceFormat::Jpg)),
            (None, None),
        ];
        for (sniffed, expected) in cases {
            assert_eq!(resolve("bin", sniffed), expected, "{sniffed:?}");
            assert_eq!(resolve("", sniffed), expected, "{sniffed:?}");
        }
    }

    #[test]
    fn test_raster_encoder_choice() {
        assert_eq!(SourceFormat::Png.raster(), Some(RasterFormat::Png));
        assert_eq!(SourceFormat::Jfif.raster(), Some(RasterFormat::Jpeg));
        assert_eq!(SourceFormat::Svg.raster(), None);
    }
}
