//! Scoped filesystem fixtures for tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::warn;

/// A fresh scratch directory, removed when the handle drops.
pub fn scratch_dir() -> io::Result<TempDir> {
    tempfile::tempdir()
}

/// Creates a directory (and any missing parents) and removes the whole
/// tree on drop.
#[derive(Debug)]
pub struct ScopedDir {
    path: PathBuf,
}

impl ScopedDir {
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Ok(ScopedDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.path) {
            warn!(path = %self.path.display(), %err, "could not remove the scoped directory");
        }
    }
}

/// Sets the permission bits on a path and restores the originals on drop.
/// Useful for provoking permission-denied paths in tests.
#[cfg(unix)]
#[derive(Debug)]
pub struct ScopedChmod {
    path: PathBuf,
    original: u32,
}

#[cfg(unix)]
impl ScopedChmod {
    pub fn set(path: impl Into<PathBuf>, mode: u32) -> io::Result<Self> {
        use std::os::unix::fs::PermissionsExt;

        let path = path.into();
        let original = fs::metadata(&path)?.permissions().mode();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode))?;
        Ok(ScopedChmod { path, original })
    }
}

#[cfg(unix)]
impl Drop for ScopedChmod {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        let perms = fs::Permissions::from_mode(self.original);
        if let Err(err) = fs::set_permissions(&self.path, perms) {
            warn!(path = %self.path.display(), %err, "could not restore permissions");
        }
    }
}
