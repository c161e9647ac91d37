//! The outer archive handle with payload redirection.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::Result;
use crate::password::Password;
use crate::read::entry::{self, EntryInfo};
use crate::read::extraction;
use crate::read::options::OpenOptions;
use crate::read::payload::{self, Extractor, PayloadArchive};

/// A read-mode archive handle.
///
/// On open the handle inspects the outer archive for a payload: the single
/// nested `.zip` entry with its encryption flag set. When one is present,
/// [`names`](Self::names), [`entry`](Self::entry),
/// [`read_to_vec`](Self::read_to_vec), [`extract`](Self::extract) and
/// [`extract_all`](Self::extract_all) transparently target the payload
/// archive, extracted lazily on first use and cached for the lifetime of
/// the handle. Without a payload the same calls target the outer archive
/// directly, so callers never need to know which case they are in.
///
/// The `side_*` accessors always target the outer archive's non-payload
/// entries.
///
/// # Example
///
/// ```rust,no_run
/// use zipseal::{Archive, OpenOptions};
///
/// let mut archive = Archive::open_path_with(
///     "vault.zip",
///     OpenOptions::new().password("secret"),
/// )?;
/// for name in archive.names()? {
///     println!("{name}");
/// }
/// # Ok::<(), zipseal::Error>(())
/// ```
pub struct Archive<R> {
    outer: ZipArchive<R>,
    source_path: Option<PathBuf>,
    password: Option<Password>,
    extractor: Extractor,
    payload_name: Option<String>,
    payload: Option<PayloadArchive>,
}

impl Archive<BufReader<File>> {
    /// Opens the archive at `path` with no password.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_path_with(path, OpenOptions::new())
    }

    /// Opens the archive at `path` with the given options.
    pub fn open_path_with(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let outer = ZipArchive::new(BufReader::new(file))?;
        Self::from_parts(outer, Some(path.to_path_buf()), options)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from any seekable reader with no password.
    pub fn open(reader: R) -> Result<Self> {
        Self::from_parts(ZipArchive::new(reader)?, None, OpenOptions::new())
    }

    /// Opens an archive from any seekable reader with a password.
    ///
    /// Reader-based handles always resolve payloads with the in-process
    /// ZIP decryption; the external backend needs an on-disk path.
    pub fn open_with_password(reader: R, password: impl Into<Password>) -> Result<Self> {
        Self::from_parts(
            ZipArchive::new(reader)?,
            None,
            OpenOptions::new().password(password),
        )
    }

    fn from_parts(
        mut outer: ZipArchive<R>,
        source_path: Option<PathBuf>,
        options: OpenOptions,
    ) -> Result<Self> {
        let payload_name = payload::find_payload(&mut outer)?;
        if let Some(name) = &payload_name {
            log::debug!("payload '{}' detected", name);
        }
        let extractor = match options.backend {
            Some(backend) => Extractor::External(backend),
            None => Extractor::Internal,
        };
        Ok(Self {
            outer,
            source_path,
            password: options.password,
            extractor,
            payload_name,
            payload: None,
        })
    }

    /// Returns whether a payload was detected at open time.
    pub fn has_payload(&self) -> bool {
        self.payload_name.is_some()
    }

    /// The detected payload entry name, if any.
    pub fn payload_name(&self) -> Option<&str> {
        self.payload_name.as_deref()
    }

    /// The password set on this handle.
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Replaces the password on this handle.
    ///
    /// An already-resolved payload stays cached; a failed resolution is
    /// retried with the new password on the next redirected access.
    pub fn set_password(&mut self, password: Option<Password>) {
        self.password = password;
    }

    /// Ensures the payload is resolved when one was detected.
    ///
    /// Resolution happens at most once per handle; on failure nothing is
    /// cached and the error propagates to the redirected accessor.
    fn resolve_payload(&mut self) -> Result<()> {
        if self.payload.is_some() {
            return Ok(());
        }
        let Some(name) = self.payload_name.clone() else {
            return Ok(());
        };
        let inner = payload::resolve(
            &mut self.outer,
            self.source_path.as_deref(),
            &name,
            self.password.as_ref(),
            &self.extractor,
        )?;
        self.payload = Some(inner);
        Ok(())
    }

    /// Lists entry names, redirected to the payload when one resolves.
    pub fn names(&mut self) -> Result<Vec<String>> {
        self.resolve_payload()?;
        Ok(match self.payload.as_ref() {
            Some(inner) => inner.file_names().map(String::from).collect(),
            None => self.outer.file_names().map(String::from).collect(),
        })
    }

    /// Returns metadata for the named entry, redirected like
    /// [`names`](Self::names).
    pub fn entry(&mut self, name: &str) -> Result<EntryInfo> {
        self.resolve_payload()?;
        match self.payload.as_mut() {
            Some(inner) => entry::lookup(inner, name),
            None => entry::lookup(&mut self.outer, name),
        }
    }

    /// Reads the named entry into memory, redirected like
    /// [`names`](Self::names).
    pub fn read_to_vec(&mut self, name: &str) -> Result<Vec<u8>> {
        self.resolve_payload()?;
        match self.payload.as_mut() {
            Some(inner) => extraction::read_entry(inner, name, None),
            None => extraction::read_entry(&mut self.outer, name, self.password.as_ref()),
        }
    }

    /// Extracts the named entry under `dest` and returns the written path,
    /// redirected like [`names`](Self::names).
    pub fn extract(&mut self, name: &str, dest: impl AsRef<Path>) -> Result<PathBuf> {
        self.resolve_payload()?;
        match self.payload.as_mut() {
            Some(inner) => extraction::extract_entry(inner, name, None, dest.as_ref()),
            None => {
                extraction::extract_entry(&mut self.outer, name, self.password.as_ref(), dest.as_ref())
            }
        }
    }

    /// Extracts every entry under `dest`, redirected like
    /// [`names`](Self::names).
    pub fn extract_all(&mut self, dest: impl AsRef<Path>) -> Result<()> {
        self.resolve_payload()?;
        match self.payload.as_mut() {
            Some(inner) => extraction::extract_all(inner, None, dest.as_ref()),
            None => extraction::extract_all(&mut self.outer, self.password.as_ref(), dest.as_ref()),
        }
    }

    /// Lists the outer archive's entry names minus the payload name.
    ///
    /// When no payload was detected this is the full outer name list.
    pub fn side_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.outer.file_names().map(String::from).collect();
        if let Some(payload_name) = &self.payload_name {
            names.retain(|name| name != payload_name);
        }
        names
    }

    /// Reads a side entry from the outer archive into memory.
    pub fn read_side_to_vec(&mut self, name: &str) -> Result<Vec<u8>> {
        extraction::read_entry(&mut self.outer, name, self.password.as_ref())
    }

    /// Extracts a side entry from the outer archive under `dest` and
    /// returns the written path.
    pub fn extract_side(&mut self, name: &str, dest: impl AsRef<Path>) -> Result<PathBuf> {
        extraction::extract_entry(&mut self.outer, name, self.password.as_ref(), dest.as_ref())
    }
}
