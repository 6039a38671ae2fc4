//! Destination key derivation.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("/{2,}").unwrap());

/// The remainder of a source key, split for naming variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyParts<'a> {
    /// Directories between the section and the file, possibly empty.
    pub directory: &'a str,
    /// File name without its last extension.
    pub base: &'a str,
    /// Raw extension, without the dot. Empty when the file has none.
    pub extension: &'a str,
}

impl<'a> KeyParts<'a> {
    pub fn split(remainder: &'a str) -> Self {
        let (directory, file) = remainder.rsplit_once('/').unwrap_or(("", remainder));
        let (base, extension) = match file.rsplit_once('.') {
            Some((base, ext)) if !base.is_empty() => (base, ext),
            _ => (file, ""),
        };
        Self {
            directory,
            base,
            extension,
        }
    }
}

/// `root/section/directory/<base>-w<width>.<ext>`, with separator runs collapsed.
pub fn build_key(
    root: &str,
    section: &str,
    directory: &str,
    base: &str,
    width: u32,
    ext: &str,
) -> String {
    let mut key = format!("{root}/{section}/");
    if !directory.is_empty() {
        key.push_str(directory);
        key.push('/');
    }
    key.push_str(&format!("{base}-w{width}.{ext}"));

    SEPARATOR_RUN.replace_all(&key, "/").into_owned()
}
