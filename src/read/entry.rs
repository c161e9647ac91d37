//! Entry metadata.

use std::io::{Read, Seek};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};

/// Metadata for a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name as stored in the archive.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Whether the entry's encryption flag is set.
    pub encrypted: bool,
    /// Whether the entry is a directory marker.
    pub is_dir: bool,
}

/// Probes whether the named entry is encrypted.
///
/// The ZIP reader refuses to open an encrypted entry without a password;
/// that rejection is the entry's general-purpose encryption bit surfaced
/// through the API, so a probe without a password reads the flag without
/// touching any content.
pub(crate) fn entry_is_encrypted<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> Result<bool> {
    match zip.by_name(name) {
        Ok(_) => Ok(false),
        Err(ZipError::UnsupportedArchive(reason)) if reason == ZipError::PASSWORD_REQUIRED => {
            Ok(true)
        }
        Err(err) => Err(Error::for_entry(err, name)),
    }
}

/// Looks up metadata for the named entry.
pub(crate) fn lookup<R: Read + Seek>(zip: &mut ZipArchive<R>, name: &str) -> Result<EntryInfo> {
    let encrypted = entry_is_encrypted(zip, name)?;
    for index in 0..zip.len() {
        let file = zip.by_index_raw(index)?;
        if file.name() == name {
            return Ok(EntryInfo {
                name: name.to_string(),
                size: file.size(),
                compressed_size: file.compressed_size(),
                encrypted,
                is_dir: file.is_dir(),
            });
        }
    }
    Err(Error::EntryNotFound {
        name: name.to_string(),
    })
}
