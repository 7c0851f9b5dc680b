//! Filesystem primitives used by the availability check

use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Trait for filesystem operations - allows mocking in tests
pub trait FileSystemOperations: Send + Sync {
    /// Succeeds when something exists at `path`.
    ///
    /// Returns `Error::NotFound` when nothing is there, or `Error::Io` when
    /// the path cannot be inspected.
    fn stat(&self, path: &Path) -> Result<()>;

    /// Removes `path` recursively (a directory and everything in it, or a
    /// single file).
    fn remove(&self, path: &Path) -> Result<()>;
}

/// The default implementation of `FileSystemOperations`, backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileSystem;

impl FileSystemOperations for DefaultFileSystem {
    fn stat(&self, path: &Path) -> Result<()> {
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
