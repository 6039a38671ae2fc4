//! `[encode]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [encode]
//! jpeg_quality = 80     # 1-100
//! webp_quality = 80     # 1-100
//! png_compression = 6   # 0 (fastest) - 9 (smallest)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const JPEG_QUALITY: FieldPath = FieldPath::new("encode.jpeg_quality");
const WEBP_QUALITY: FieldPath = FieldPath::new("encode.webp_quality");
const PNG_COMPRESSION: FieldPath = FieldPath::new("encode.png_compression");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeConfig {
    /// Quality for the original-format JPEG variants.
    pub jpeg_quality: u8,

    /// Quality for lossy WebP variants.
    pub webp_quality: u8,

    /// PNG compression level.
    pub png_compression: u8,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            webp_quality: 80,
            png_compression: 6,
        }
    }
}

impl EncodeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, quality) in [
            (JPEG_QUALITY, self.jpeg_quality),
            (WEBP_QUALITY, self.webp_quality),
        ] {
            if !(1..=100).contains(&quality) {
                diag.error(field, format!("quality must be within 1-100, got {quality}"));
            }
        }
        if self.png_compression > 9 {
            diag.error(
                PNG_COMPRESSION,
                format!(
                    "compression level must be within 0-9, got {}",
                    self.png_compression
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.encode.jpeg_quality, 80);
        assert_eq!(config.encode.webp_quality, 80);
        assert_eq!(config.encode.png_compression, 6);
    }

    #[test]
    fn test_validate_ranges() {
        let cases = [
            ("[encode]\njpeg_quality = 0", 1),
            ("[encode]\nwebp_quality = 101", 1),
            ("[encode]\npng_compression = 10", 1),
            ("[encode]\njpeg_quality = 0\nwebp_quality = 0\npng_compression = 12", 3),
            ("[encode]\njpeg_quality = 100\nwebp_quality = 1\npng_compression = 0", 0),
        ];
        for (input, expected) in cases {
            let config = test_parse_config(input);
            let mut diag = ConfigDiagnostics::new();
            config.encode.validate(&mut diag);
            assert_eq!(diag.len(), expected, "failed for {input}");
        }
    }
}
