//! Entry reads and on-disk extraction.

use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::password::Password;
use crate::read::entry;

/// Reads the named entry fully into memory, decrypting with the handle
/// password when the entry is encrypted.
pub(crate) fn read_entry<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
    password: Option<&Password>,
) -> Result<Vec<u8>> {
    let encrypted = entry::entry_is_encrypted(zip, name)?;
    let mut file = if encrypted {
        let password = password.ok_or(Error::PasswordRequired)?;
        zip.by_name_decrypt(name, password.as_bytes())
            .map_err(|err| Error::for_entry(err, name))?
    } else {
        zip.by_name(name).map_err(|err| Error::for_entry(err, name))?
    };
    let mut buffer = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Writes the named entry under `dest`, creating parent directories, and
/// returns the written path. Directory markers create the directory.
pub(crate) fn extract_entry<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
    password: Option<&Password>,
    dest: &Path,
) -> Result<PathBuf> {
    let out_path = dest.join(sanitized_relative(name)?);
    if name.ends_with('/') {
        fs::create_dir_all(&out_path)?;
        return Ok(out_path);
    }
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = read_entry(zip, name, password)?;
    fs::write(&out_path, bytes)?;
    Ok(out_path)
}

/// Extracts every entry of the archive under `dest`.
pub(crate) fn extract_all<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    password: Option<&Password>,
    dest: &Path,
) -> Result<()> {
    let names: Vec<String> = zip.file_names().map(String::from).collect();
    for name in names {
        extract_entry(zip, &name, password, dest)?;
    }
    Ok(())
}

// Entry names must stay inside the destination directory.
fn sanitized_relative(name: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => {
                return Err(Error::Io(io::Error::other(format!(
                    "entry name escapes destination: {name}"
                ))));
            }
        }
    }
    if relative.as_os_str().is_empty() {
        return Err(Error::EntryNotFound {
            name: name.to_string(),
        });
    }
    Ok(relative)
}
