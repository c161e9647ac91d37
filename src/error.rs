//! Error types for sealed-archive operations.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. Errors can be handled with the `?`
//! operator or matched exhaustively:
//!
//! ```rust,no_run
//! use zipseal::{Archive, Error, Result};
//!
//! fn list(path: &str) -> Result<Vec<String>> {
//!     let mut archive = Archive::open_path(path)?;
//!     match archive.names() {
//!         Err(Error::PasswordRequired) => {
//!             eprintln!("archive is sealed; supply a password");
//!             Err(Error::PasswordRequired)
//!         }
//!         other => other,
//!     }
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// The main error type for sealed-archive operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The underlying ZIP reader or writer reported an error.
    ///
    /// This wraps [`zip::result::ZipError`] and covers malformed archives,
    /// unknown entries and wrong-password rejections from the in-process
    /// decryption path.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An open mode outside the supported set was requested.
    ///
    /// Only `r`, `w` and `a` are valid open modes. The error names the
    /// offending mode and the allowed set.
    #[error("unsupported open mode '{mode}': supported modes are {supported}")]
    UnsupportedMode {
        /// The mode string that was rejected.
        mode: String,
        /// Comma-separated list of the supported modes.
        supported: &'static str,
    },

    /// Append mode was requested on an archive that already carries a
    /// sealed payload.
    ///
    /// Sealed archives cannot be appended to in place; this is detected at
    /// open time and is fatal, not retried.
    #[error("cannot append to sealed archive '{}'", path.display())]
    AppendSealed {
        /// The archive that was opened for append.
        path: PathBuf,
    },

    /// The external archiver backend failed.
    ///
    /// By the backend's own convention an exit status of 0 or 1 means
    /// "completed, possibly with warnings"; anything above 1 is a failure
    /// and the captured standard-error text is carried verbatim.
    #[error("archiver backend exited with status {status}: {stderr}")]
    Backend {
        /// The process exit status (`-1` when killed by a signal).
        status: i32,
        /// Captured standard-error output of the backend.
        stderr: String,
    },

    /// The named entry does not exist in the targeted archive.
    #[error("entry not found: {name}")]
    EntryNotFound {
        /// The entry name that was requested.
        name: String,
    },

    /// A password is required but none was set on the handle.
    ///
    /// Returned when payload resolution or an encrypted-entry read is
    /// attempted on a handle opened without a password.
    #[error("password required for sealed archive")]
    PasswordRequired,

    /// The scratch extraction directory could not be removed.
    ///
    /// Removal is retried once before this error is raised; an
    /// already-missing directory is never an error.
    #[error("failed to remove scratch directory '{}': {source}", path.display())]
    ScratchCleanup {
        /// The directory that could not be removed.
        path: PathBuf,
        /// The underlying I/O error from the second removal attempt.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns `true` if this error is password-related.
    ///
    /// Password errors are recoverable by reopening the archive with the
    /// correct password.
    pub fn is_password_error(&self) -> bool {
        match self {
            Error::PasswordRequired => true,
            Error::Zip(zip::result::ZipError::InvalidPassword) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error came from the external backend.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Error::Backend { .. })
    }

    /// Maps a ZIP "file not found" rejection to [`Error::EntryNotFound`]
    /// carrying the requested name; other errors pass through.
    pub(crate) fn for_entry(err: zip::result::ZipError, name: &str) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => Error::EntryNotFound { name: name.into() },
            other => Error::Zip(other),
        }
    }
}

/// A specialized Result type for sealed-archive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_unsupported_mode() {
        let err = Error::UnsupportedMode {
            mode: "x".into(),
            supported: "r, w, a",
        };
        let msg = err.to_string();
        assert!(msg.contains("'x'"));
        assert!(msg.contains("r, w, a"));
    }

    #[test]
    fn test_append_sealed() {
        let err = Error::AppendSealed {
            path: PathBuf::from("vault.zip"),
        };
        assert!(err.to_string().contains("vault.zip"));
        assert!(err.to_string().contains("append"));
    }

    #[test]
    fn test_backend_error() {
        let err = Error::Backend {
            status: 2,
            stderr: "Wrong password?".into(),
        };
        assert!(err.is_backend_error());
        let msg = err.to_string();
        assert!(msg.contains("status 2"));
        assert!(msg.contains("Wrong password?"));
    }

    #[test]
    fn test_entry_not_found() {
        let err = Error::EntryNotFound {
            name: "missing.txt".into(),
        };
        assert_eq!(err.to_string(), "entry not found: missing.txt");
    }

    #[test]
    fn test_for_entry_maps_file_not_found() {
        let err = Error::for_entry(zip::result::ZipError::FileNotFound, "a.txt");
        assert!(matches!(err, Error::EntryNotFound { name } if name == "a.txt"));

        let err = Error::for_entry(zip::result::ZipError::InvalidPassword, "a.txt");
        assert!(matches!(err, Error::Zip(_)));
    }

    #[test]
    fn test_is_password_error() {
        assert!(Error::PasswordRequired.is_password_error());
        assert!(Error::Zip(zip::result::ZipError::InvalidPassword).is_password_error());
        assert!(
            !Error::Backend {
                status: 2,
                stderr: String::new(),
            }
            .is_password_error()
        );
    }

    #[test]
    fn test_scratch_cleanup_preserves_source() {
        let err = Error::ScratchCleanup {
            path: PathBuf::from("/tmp/zipseal-abc"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "locked"),
        };
        assert!(err.to_string().contains("zipseal-abc"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
