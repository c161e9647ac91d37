//! Options for write- and append-mode archives.

use zip::write::SimpleFileOptions;

use crate::backend::Backend;
use crate::password::Password;

/// Entry compression for write-mode archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Store entries uncompressed (the default; sealed wrappers are always
    /// stored, so compressing the inner archive rarely pays off).
    #[default]
    Stored,
    /// Deflate entries.
    Deflated,
}

impl Compression {
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Self::Stored => zip::CompressionMethod::Stored,
            Self::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}

/// Options for creating or appending to an archive.
///
/// # Example
///
/// ```rust,no_run
/// use zipseal::{WriteOptions, Writer};
///
/// let options = WriteOptions::new().password("secret");
/// let mut writer = Writer::create_path_with("vault.zip", options)?;
/// writer.add_bytes("img01.jpg", b"...")?;
/// writer.close()?;
/// # Ok::<(), zipseal::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub(crate) compression: Compression,
    pub(crate) large_file: bool,
    pub(crate) password: Option<Password>,
    pub(crate) backend: Backend,
}

impl WriteOptions {
    /// Creates options with stored compression, no password and the
    /// environment-resolved backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry compression method.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Enables zip64 size extensions for entries over 4 GiB.
    pub fn large_file(mut self, large_file: bool) -> Self {
        self.large_file = large_file;
        self
    }

    /// Sets the sealing password.
    ///
    /// A write-mode handle with a non-empty password seals the archive
    /// through the backend on close; without one, close is a plain close.
    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Overrides the archiver backend used for sealing.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub(crate) fn file_options(&self) -> SimpleFileOptions {
        self.file_options_with(self.compression)
    }

    pub(crate) fn file_options_with(&self, compression: Compression) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(compression.method())
            .large_file(self.large_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stored_without_password() {
        let options = WriteOptions::new();
        assert_eq!(options.compression, Compression::Stored);
        assert!(!options.large_file);
        assert!(options.password.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let options = WriteOptions::new()
            .compression(Compression::Deflated)
            .large_file(true)
            .password("pw");
        assert_eq!(options.compression, Compression::Deflated);
        assert!(options.large_file);
        assert_eq!(options.password.unwrap().as_str(), "pw");
    }
}
