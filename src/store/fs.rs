//! Local directory backend.
//!
//! Layout: `<root>/<bucket>/<key>`. Content types are implied by the key's
//! extension and not persisted.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{ObjectStore, StoreError};

#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root` (`~` is expanded).
    pub fn new(root: &Path) -> Self {
        let expanded = shellexpand::tilde(&root.to_string_lossy()).into_owned();
        Self {
            root: PathBuf::from(expanded),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a bucket/key to a path, refusing anything that could escape the root.
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        let invalid = || StoreError::InvalidKey {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };

        if !is_plain_segment(bucket) {
            return Err(invalid());
        }

        let mut path = self.root.join(bucket);
        let mut segments = 0;
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            if !is_plain_segment(segment) {
                return Err(invalid());
            }
            path.push(segment);
            segments += 1;
        }

        if segments == 0 {
            return Err(invalid());
        }
        Ok(path)
    }
}

#[inline]
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
}

impl ObjectStore for FsStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(bucket, key)?;
        fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StoreError::Io(path, err),
        })
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        _content_type: &str,
    ) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(parent.to_path_buf(), err))?;
        }
        fs::write(&path, body).map_err(|err| StoreError::Io(path, err))
    }
}
