//! Payload detection and resolution.
//!
//! A payload is the single nested `.zip` entry of an outer archive whose
//! encryption flag is set. Detection runs once at open time against the
//! outer archive only; resolution (extract, buffer, reopen) is deferred to
//! the first redirected access and memoized by the owning handle. Nothing
//! here consults the handle's public accessors, so resolution can never
//! recurse into itself.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::password::Password;
use crate::read::{entry, extraction};
use crate::scratch::ScratchDir;

/// How payload bytes are pulled out of the outer archive.
#[derive(Debug, Clone)]
pub(crate) enum Extractor {
    /// Decrypt with the ZIP reader itself.
    Internal,
    /// Shell out to the archiver backend (requires an on-disk archive).
    External(Backend),
}

/// The resolved payload: a read-only archive over an in-memory buffer of
/// decrypted plaintext bytes.
pub(crate) type PayloadArchive = ZipArchive<Cursor<Vec<u8>>>;

/// Returns the payload entry name, if the outer archive has one.
///
/// Candidates are entries with a `.zip` extension. There is a payload only
/// when exactly one candidate exists and that candidate is encrypted; an
/// unencrypted nested zip is just a normal entry.
pub(crate) fn find_payload<R: Read + Seek>(outer: &mut ZipArchive<R>) -> Result<Option<String>> {
    let candidate = {
        let mut candidates = outer.file_names().filter(|name| has_zip_extension(name));
        match (candidates.next(), candidates.next()) {
            (Some(name), None) => name.to_string(),
            _ => return Ok(None),
        }
    };
    if entry::entry_is_encrypted(outer, &candidate)? {
        Ok(Some(candidate))
    } else {
        Ok(None)
    }
}

fn has_zip_extension(name: &str) -> bool {
    Path::new(name).extension() == Some(std::ffi::OsStr::new("zip"))
}

/// Extracts the payload into a fresh scratch directory, buffers it into
/// memory, removes the scratch directory and reopens the buffer as an
/// archive handle.
///
/// Failures propagate without caching anything, so a later access may
/// retry (for example after the password has been corrected).
pub(crate) fn resolve<R: Read + Seek>(
    outer: &mut ZipArchive<R>,
    source_path: Option<&Path>,
    payload_name: &str,
    password: Option<&Password>,
    extractor: &Extractor,
) -> Result<PayloadArchive> {
    let scratch = ScratchDir::create()?;
    // the backend's `e` command drops directory structure, so the file
    // always lands directly under the scratch directory
    let file_name = Path::new(payload_name)
        .file_name()
        .map(Path::new)
        .unwrap_or_else(|| Path::new(payload_name));
    let extracted = scratch.path().join(file_name);

    match extractor {
        Extractor::External(backend) => {
            let password = password.ok_or(Error::PasswordRequired)?;
            let archive = source_path.ok_or_else(|| {
                Error::Io(std::io::Error::other(
                    "backend extraction requires a path-opened archive",
                ))
            })?;
            backend.extract(archive, payload_name, password, scratch.path())?;
        }
        Extractor::Internal => {
            let bytes = extraction::read_entry(outer, payload_name, password)?;
            fs::write(&extracted, bytes)?;
        }
    }

    let buffer = fs::read(&extracted)?;
    scratch.remove()?;
    log::debug!("resolved payload '{}' ({} bytes)", payload_name, buffer.len());
    Ok(ZipArchive::new(Cursor::new(buffer))?)
}
