//! Resizer configuration management for `resizer.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── output     # [output]
//! │   ├── encode     # [encode]
//! │   ├── vector     # [vector]
//! │   └── route      # [route]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # ResizeConfig (this file)
//! ```
//!
//! Every field is optional; a missing config file means defaults. The loaded
//! value is handed to the pipeline explicitly, there is no global config.

pub mod section;
pub mod types;

pub use section::{EncodeConfig, OutputConfig, RouteConfig, VectorConfig, VectorWebp};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, debug, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing resizer.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Path the config was loaded from (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Destination prefix and width list
    #[serde(default)]
    pub output: OutputConfig,

    /// Encoder quality knobs
    #[serde(default)]
    pub encode: EncodeConfig,

    /// Vector source handling
    #[serde(default)]
    pub vector: VectorConfig,

    /// Section allow-list
    #[serde(default)]
    pub route: RouteConfig,
}

impl ResizeConfig {
    /// Load configuration from CLI arguments.
    ///
    /// A missing config file is not an error: every setting has a default.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)?
        } else {
            debug!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };

        config.config_path = cli.config.clone();
        config.apply_overrides(cli.prefix.as_deref(), &cli.sections);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    ///
    /// Runs unattended, so unlike an interactive tool this never prompts.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Apply CLI overrides on top of the file values.
    fn apply_overrides(&mut self, prefix: Option<&str>, sections: &[String]) {
        if let Some(prefix) = prefix {
            self.output.prefix = prefix.to_string();
        }
        if !sections.is_empty() {
            self.route.sections = sections.to_vec();
        }
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.output.validate(&mut diag);
        self.encode.validate(&mut diag);
        self.vector.validate(&mut diag);
        self.route.validate(self.output.root(), &mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ResizeConfig {
    let (parsed, ignored) = ResizeConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
