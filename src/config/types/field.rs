//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a config field, used to point diagnostics at the
/// offending TOML key.
///
/// # Example
///
/// ```ignore
/// const WIDTHS: FieldPath = FieldPath::new("output.widths");
/// diag.error(WIDTHS, "must not be empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_as_str() {
        const PATH: FieldPath = FieldPath::new("encode.jpeg_quality");
        assert_eq!(PATH.as_str(), "encode.jpeg_quality");
        assert_eq!(PATH.as_ref(), "encode.jpeg_quality");
    }

    #[test]
    fn test_field_path_display_contains_path() {
        let shown = FieldPath::new("vector.base_width").to_string();
        assert!(shown.contains("`vector.base_width`"));
    }
}
