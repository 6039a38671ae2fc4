//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! prefix = "resized/"                          # destination root, also the skip sentinel
//! widths = [50, 100, 200, 400, 600, 800, 1200] # ascending target widths
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Default destination root.
pub const DEFAULT_PREFIX: &str = "resized/";

/// Default ascending width list.
pub const DEFAULT_WIDTHS: &[u32] = &[50, 100, 200, 400, 600, 800, 1200];

/// Widths above this only produce a warning.
const LARGE_WIDTH: u32 = 8192;

const PREFIX: FieldPath = FieldPath::new("output.prefix");
const WIDTHS: FieldPath = FieldPath::new("output.widths");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination root every variant is written under.
    pub prefix: String,

    /// Fixed ascending list of requested widths.
    pub widths: Vec<u32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            widths: DEFAULT_WIDTHS.to_vec(),
        }
    }
}

impl OutputConfig {
    /// Destination root as a single path segment, without slashes.
    ///
    /// This is what the first segment of a source key is compared against.
    pub fn root(&self) -> &str {
        self.prefix.trim_matches('/')
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.root().is_empty() {
            diag.error_with_hint(
                PREFIX,
                "destination prefix must not be empty",
                format!("set {} = \"{}\"", PREFIX.as_str(), DEFAULT_PREFIX),
            );
        } else if self.root().contains('/') {
            diag.error(PREFIX, "destination prefix must be a single path segment");
        }

        if self.widths.is_empty() {
            diag.error(WIDTHS, "at least one width is required");
            return;
        }
        if self.widths.contains(&0) {
            diag.error(WIDTHS, "widths must be greater than zero");
        }
        if self.widths.windows(2).any(|w| w[0] >= w[1]) {
            diag.error_with_hint(
                WIDTHS,
                "widths must be strictly ascending",
                "sort the list and remove duplicates",
            );
        }
        if let Some(max) = self.widths.iter().max()
            && *max > LARGE_WIDTH
        {
            diag.warn(WIDTHS, format!("width {max} is unusually large"));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.output.prefix, "resized/");
        assert_eq!(config.output.widths, vec![50, 100, 200, 400, 600, 800, 1200]);
        assert_eq!(config.output.root(), "resized");
    }

    #[test]
    fn test_custom_values() {
        let config = test_parse_config("[output]\nprefix = \"/thumbs/\"\nwidths = [64, 128]");
        assert_eq!(config.output.root(), "thumbs");
        assert_eq!(config.output.widths, vec![64, 128]);
    }

    #[test]
    fn test_validate() {
        let cases = [
            ("[output]\nprefix = \"/\"", 1),
            ("[output]\nprefix = \"a/b\"", 1),
            ("[output]\nwidths = []", 1),
            ("[output]\nwidths = [0, 10]", 1),
            ("[output]\nwidths = [100, 50]", 1),
            ("[output]\nwidths = [50, 50]", 1),
            ("[output]\nwidths = [50, 100]", 0),
        ];
        for (input, expected) in cases {
            let config = test_parse_config(input);
            let mut diag = crate::config::ConfigDiagnostics::new();
            config.output.validate(&mut diag);
            assert_eq!(diag.len(), expected, "failed for {input}");
        }
    }
}
