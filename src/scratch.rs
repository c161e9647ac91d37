//! Scratch directories for payload extraction.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io, thread};

use crate::error::{Error, Result};

const RETRY_DELAY: Duration = Duration::from_millis(50);

/// A uniquely-named scratch directory under the system temp dir.
///
/// One is created per payload-resolution attempt and lives only long
/// enough to read the extracted payload into memory. The random name
/// keeps resolutions on different handles from colliding, so no locking
/// is needed. Removal is explicit via [`remove`](Self::remove); `Drop`
/// is a best-effort backstop for early-error paths.
#[derive(Debug)]
pub(crate) struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// Creates a fresh scratch directory with a random name.
    pub fn create() -> Result<Self> {
        let name = format!("zipseal-{}", uuid::Uuid::new_v4().simple());
        let path = env::temp_dir().join(name);
        fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory tree.
    ///
    /// A transient failure (such as a file lock) is retried once after a
    /// short delay; an already-missing directory is a no-op. A second
    /// failure propagates as [`Error::ScratchCleanup`].
    pub fn remove(mut self) -> Result<()> {
        self.removed = true;
        match remove_tree(&self.path) {
            Ok(()) => Ok(()),
            Err(first) => {
                log::warn!(
                    "removing scratch directory '{}' failed, retrying: {}",
                    self.path.display(),
                    first
                );
                thread::sleep(RETRY_DELAY);
                remove_tree(&self.path).map_err(|source| Error::ScratchCleanup {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

fn remove_tree(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if !self.removed {
            if let Err(e) = remove_tree(&self.path) {
                log::warn!(
                    "leaking scratch directory '{}': {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_remove() {
        let scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();
        assert!(path.is_dir());
        fs::write(path.join("payload.zip"), b"bytes").unwrap();
        scratch.remove().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_tolerates_missing() {
        let scratch = ScratchDir::create().unwrap();
        fs::remove_dir_all(scratch.path()).unwrap();
        scratch.remove().unwrap();
    }

    #[test]
    fn test_drop_backstop() {
        let path = {
            let scratch = ScratchDir::create().unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_names_are_unique() {
        let a = ScratchDir::create().unwrap();
        let b = ScratchDir::create().unwrap();
        assert_ne!(a.path(), b.path());
    }
}
