//! `[vector]` section configuration.
//!
//! SVG sources are rasterized at `max(base_width, target)` before being
//! scaled down to the target width.
//!
//! # Example
//!
//! ```toml
//! [vector]
//! base_width = 1200     # minimum rasterization width
//! webp = "lossless"     # lossless | lossy (uses encode.webp_quality)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const BASE_WIDTH: FieldPath = FieldPath::new("vector.base_width");

/// WebP encoding mode for rasterized vector sources.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VectorWebp {
    /// Lossless WebP.
    #[default]
    Lossless,
    /// Lossy WebP at `encode.webp_quality`.
    Lossy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Minimum rasterization width.
    pub base_width: u32,

    /// WebP mode for the rasterized variant.
    pub webp: VectorWebp,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            base_width: 1200,
            webp: VectorWebp::Lossless,
        }
    }
}

impl VectorConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.base_width == 0 {
            diag.error_with_hint(
                BASE_WIDTH,
                "base width must be greater than zero",
                format!("set {} = 1200", BASE_WIDTH.as_str()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.vector.base_width, 1200);
        assert_eq!(config.vector.webp, VectorWebp::Lossless);
    }

    #[test]
    fn test_webp_mode_parsing() {
        let cases = [("lossless", VectorWebp::Lossless), ("lossy", VectorWebp::Lossy)];
        for (input, expected) in cases {
            let config = test_parse_config(&format!("[vector]\nwebp = \"{input}\""));
            assert_eq!(config.vector.webp, expected, "failed for {input}");
        }
    }

    #[test]
    fn test_zero_base_width_rejected() {
        let config = test_parse_config("[vector]\nbase_width = 0");
        let mut diag = ConfigDiagnostics::new();
        config.vector.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
