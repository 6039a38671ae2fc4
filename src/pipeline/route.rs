//! Key routing: section extraction and reprocessing guards.

use crate::config::RouteConfig;

use super::SkipReason;

/// Where a source key lands, or why it is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Routed { section: &'a str, remainder: &'a str },
    Skip(SkipReason),
}

/// Split `key` into section and remainder and apply the skip rules.
///
/// `root` is the destination root without surrounding slashes. A key with a
/// single segment has an empty section and the whole key as remainder.
pub fn route<'a>(key: &'a str, root: &str, config: &RouteConfig) -> Route<'a> {
    let key = key.trim_start_matches('/');
    let (section, remainder) = key.split_once('/').unwrap_or(("", key));

    if section == root.trim_matches('/') {
        return Route::Skip(SkipReason::AlreadyResized);
    }
    if !config.allows(section) {
        return Route::Skip(SkipReason::NotWhitelisted);
    }

    Route::Routed { section, remainder }
}
