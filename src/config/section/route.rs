//! `[route]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [route]
//! sections = ["products", "gallery"]   # empty = every section
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

const SECTIONS: FieldPath = FieldPath::new("route.sections");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Allow-list of first path segments. Empty allows everything.
    pub sections: Vec<String>,
}

impl RouteConfig {
    /// Check a section against the allow-list.
    pub fn allows(&self, section: &str) -> bool {
        self.sections.is_empty() || self.sections.iter().any(|s| s == section)
    }

    pub fn validate(&self, root: &str, diag: &mut ConfigDiagnostics) {
        for section in &self.sections {
            if section.is_empty() || section.contains('/') {
                diag.error(
                    SECTIONS,
                    format!("`{section}` is not a single path segment"),
                );
            } else if section == root {
                diag.warn(
                    SECTIONS,
                    format!("`{section}` is the destination root and is always skipped"),
                );
            }
        }
    }
}
