//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only shows up with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("resize"; "gallery/a.svg -> {} variants", count);
//! debug!("put"; "{} ({} bytes)", key, len);
//! ```

use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Errors and warnings go to stderr so that stdout stays parseable when the
/// result list is piped somewhere.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    if is_diagnostic(&module_lower) {
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
    } else {
        let mut stdout = stdout().lock();
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }
}

#[inline]
fn is_diagnostic(module_lower: &str) -> bool {
    matches!(module_lower, "error" | "warning" | "hint")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "skip" => prefix.bright_black().bold().to_string(),
        "put" => prefix.bright_blue().bold().to_string(),
        "resize" | "done" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_modules_go_to_stderr() {
        assert!(is_diagnostic("error"));
        assert!(is_diagnostic("warning"));
        assert!(is_diagnostic("hint"));
        assert!(!is_diagnostic("resize"));
        assert!(!is_diagnostic("skip"));
    }

    #[test]
    fn test_prefix_keeps_module_name() {
        assert!(colorize_prefix("Resize", "resize").contains("[Resize]"));
        assert!(colorize_prefix("put", "put").contains("[put]"));
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
