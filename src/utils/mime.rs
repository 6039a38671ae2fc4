//! Content types for variant keys.

/// MIME type constants for the formats this tool reads or writes.
pub mod types {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const WEBP: &str = "image/webp";
    pub const SVG: &str = "image/svg+xml";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Content type for a variant extension (case-insensitive).
pub fn from_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jfif" => types::JPEG,
        "png" => types::PNG,
        "webp" => types::WEBP,
        "svg" => types::SVG,
        _ => types::OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        let cases = [
            ("jpg", types::JPEG),
            ("jpeg", types::JPEG),
            ("jfif", types::JPEG),
            ("JPG", types::JPEG),
            ("png", types::PNG),
            ("webp", types::WEBP),
            ("svg", types::SVG),
            ("gif", types::OCTET_STREAM),
            ("", types::OCTET_STREAM),
        ];
        for (ext, expected) in cases {
            assert_eq!(from_extension(ext), expected, "{ext}");
        }
    }
}
