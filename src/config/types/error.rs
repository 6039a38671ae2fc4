//! Errors raised while loading `resizer.toml`.

use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::FieldPath;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in config file")]
    Toml(#[from] toml::de::Error),

    /// Rendered in full by `Display`, so it carries no `source`.
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// One rejected setting.
#[derive(Debug, Clone)]
struct Problem {
    field: FieldPath,
    message: String,
    hint: Option<String>,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {} {}: {}", "•".red(), self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {hint}", "try:".yellow())?;
        }
        Ok(())
    }
}

/// Every problem found in one validation pass.
///
/// Warnings are logged and never reject the config.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    problems: Vec<Problem>,
    warnings: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field, message.into(), Some(hint.into()));
    }

    fn push(&mut self, field: FieldPath, message: String, hint: Option<String>) {
        self.problems.push(Problem {
            field,
            message,
            hint,
        });
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push((field, message.into()));
    }

    pub fn print_warnings(&self) {
        for (field, message) in &self.warnings {
            crate::log!("warning"; "[{}] {}", field.as_str(), message);
        }
    }

    /// Number of errors, warnings excluded.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.len() == 1 { "problem" } else { "problems" };
        let header = format!("resizer.toml has {} {noun}:", self.len());
        write!(f, "{}", header.red().bold())?;
        for problem in &self.problems {
            write!(f, "\n{problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
