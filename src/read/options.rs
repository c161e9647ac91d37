//! Open options for read-mode archives.

use crate::backend::Backend;
use crate::password::Password;

/// Options for opening an archive in read mode.
///
/// # Example
///
/// ```rust,no_run
/// use zipseal::{Archive, OpenOptions};
///
/// let options = OpenOptions::new().password("secret");
/// let archive = Archive::open_path_with("vault.zip", options)?;
/// # Ok::<(), zipseal::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    pub(crate) password: Option<Password>,
    pub(crate) backend: Option<Backend>,
}

impl OpenOptions {
    /// Creates options with no password and in-process payload extraction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the password used for payload resolution and encrypted-entry
    /// reads.
    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Extracts payloads with the external archiver backend instead of the
    /// in-process ZIP decryption.
    ///
    /// The backend operates on files, so this only takes effect with the
    /// path-based open constructors.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }
}
