//! Writing and sealing archives.
//!
//! [`Writer`] builds a plain ZIP in place and, when a password is set,
//! seals it on close: the backend packs the plain archive plus any
//! registered side files into a new password-encrypted wrapper that
//! atomically replaces the target. [`WriteOptions`] configures
//! compression, the zip64 flag, the password and the backend.

mod options;

pub use options::{Compression, WriteOptions};

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::{ZipArchive, ZipWriter};

use crate::error::{Error, Result};
use crate::mode::OpenMode;
use crate::password::Password;
use crate::read::payload;

/// A write- or append-mode archive handle.
///
/// Entries accumulate into a plain ZIP at the target path. An explicit
/// [`close`](Self::close) finishes the archive and, in write mode with a
/// non-empty password, replaces it with the sealed wrapper. Close is
/// idempotent, and `Drop` performs a best-effort close so the archive is
/// finished on normal or early exit from the owning scope.
///
/// Append mode never seals and is rejected at open time when the target
/// already carries a payload.
pub struct Writer {
    path: PathBuf,
    zip: Option<ZipWriter<File>>,
    options: WriteOptions,
    side_files: Vec<PathBuf>,
    mode: OpenMode,
}

impl Writer {
    /// Creates a new archive at `path` with default options.
    pub fn create_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_path_with(path, WriteOptions::new())
    }

    /// Creates a new archive at `path` with the given options.
    pub fn create_path_with(path: impl AsRef<Path>, options: WriteOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            zip: Some(ZipWriter::new(file)),
            options,
            side_files: Vec::new(),
            mode: OpenMode::Write,
        })
    }

    /// Opens the existing plain archive at `path` for appending.
    pub fn append_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::append_path_with(path, WriteOptions::new())
    }

    /// Opens the existing plain archive at `path` for appending, with the
    /// given options.
    ///
    /// Sealed archives cannot be appended to in place: when payload
    /// detection finds one in the target, this fails with
    /// [`Error::AppendSealed`].
    pub fn append_path_with(path: impl AsRef<Path>, options: WriteOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        {
            let file = File::open(&path)?;
            let mut outer = ZipArchive::new(BufReader::new(file))?;
            if payload::find_payload(&mut outer)?.is_some() {
                return Err(Error::AppendSealed { path });
            }
        }
        let file = File::options().read(true).write(true).open(&path)?;
        Ok(Self {
            path,
            zip: Some(ZipWriter::new_append(file)?),
            options,
            side_files: Vec::new(),
            mode: OpenMode::Append,
        })
    }

    /// The target archive path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The mode this handle was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// The password set on this handle.
    pub fn password(&self) -> Option<&Password> {
        self.options.password.as_ref()
    }

    /// Replaces the password on this handle before close.
    pub fn set_password(&mut self, password: Option<Password>) {
        self.options.password = password;
    }

    /// The side files registered so far.
    pub fn side_files(&self) -> &[PathBuf] {
        &self.side_files
    }

    /// Adds an entry from an in-memory buffer.
    pub fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let file_options = self.options.file_options();
        let zip = self.zip.as_mut().ok_or_else(closed)?;
        zip.start_file(name, file_options)?;
        zip.write_all(data)?;
        Ok(())
    }

    /// Adds the file or directory at `path` under its file name.
    ///
    /// Directories are added recursively; see
    /// [`add_path_as`](Self::add_path_as).
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Io(io::Error::other(format!(
                    "cannot derive an archive name from '{}'",
                    path.display()
                )))
            })?;
        self.add_path_as(path, &name)
    }

    /// Adds the file or directory at `path` under `arcname`.
    ///
    /// A directory contributes one directory-marker entry plus every file
    /// beneath it, named by its path relative to the directory: N files
    /// become N + 1 entries, structure preserved, nothing skipped.
    pub fn add_path_as(&mut self, path: impl AsRef<Path>, arcname: &str) -> Result<()> {
        let compression = self.options.compression;
        self.add_path_impl(path.as_ref(), arcname, compression)
    }

    /// Like [`add_path_as`](Self::add_path_as) with a per-call compression
    /// override.
    pub fn add_path_compressed(
        &mut self,
        path: impl AsRef<Path>,
        arcname: &str,
        compression: Compression,
    ) -> Result<()> {
        self.add_path_impl(path.as_ref(), arcname, compression)
    }

    fn add_path_impl(&mut self, path: &Path, arcname: &str, compression: Compression) -> Result<()> {
        if path.is_dir() {
            self.add_tree(path, arcname.trim_end_matches('/'), compression)
        } else {
            self.add_file(path, arcname, compression)
        }
    }

    /// Registers a file to merge into the sealed wrapper as a sibling of
    /// the payload, invisible to the inner archive's entry list.
    ///
    /// Side files only take effect when the archive is sealed on close.
    pub fn add_side_file(&mut self, path: impl AsRef<Path>) {
        self.side_files.push(path.as_ref().to_path_buf());
    }

    /// Finishes the archive; in write mode with a non-empty password,
    /// seals it through the backend.
    ///
    /// Calling close again after the handle is finished is a no-op: the
    /// backend is never re-invoked.
    pub fn close(&mut self) -> Result<()> {
        let Some(zip) = self.zip.take() else {
            return Ok(());
        };
        zip.finish()?;
        let seal_password = match (self.mode, &self.options.password) {
            (OpenMode::Write, Some(password)) if !password.is_empty() => Some(password.clone()),
            _ => None,
        };
        if let Some(password) = seal_password {
            self.seal(&password)?;
        }
        Ok(())
    }

    fn add_file(&mut self, path: &Path, arcname: &str, compression: Compression) -> Result<()> {
        let file_options = self.options.file_options_with(compression);
        let mut input = File::open(path)?;
        let zip = self.zip.as_mut().ok_or_else(closed)?;
        zip.start_file(arcname, file_options)?;
        io::copy(&mut input, zip)?;
        Ok(())
    }

    fn add_tree(&mut self, root: &Path, arcname: &str, compression: Compression) -> Result<()> {
        let file_options = self.options.file_options_with(compression);
        {
            let zip = self.zip.as_mut().ok_or_else(closed)?;
            zip.add_directory(arcname, file_options)?;
        }
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            self.add_file(entry.path(), &tree_entry_name(arcname, relative), compression)?;
        }
        Ok(())
    }

    /// Builds the sealed wrapper under a temporary name next to the
    /// target, then renames it over the target so a partially-written
    /// wrapper is never visible at the archive path.
    fn seal(&self, password: &Password) -> Result<()> {
        let stem = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("archive"));
        let suffix = uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        let temp_name = format!("{stem}_{suffix}.zip");
        let temp_path = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&temp_name),
            _ => PathBuf::from(&temp_name),
        };

        let mut inputs = Vec::with_capacity(1 + self.side_files.len());
        inputs.push(self.path.clone());
        inputs.extend(self.side_files.iter().cloned());

        self.options.backend.add(&temp_path, password, &inputs)?;
        fs::rename(&temp_path, &self.path)?;
        log::debug!(
            "sealed '{}' with {} side files",
            self.path.display(),
            self.side_files.len()
        );
        Ok(())
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        if self.zip.is_some() {
            if let Err(err) = self.close() {
                log::warn!("closing '{}' on drop failed: {}", self.path.display(), err);
            }
        }
    }
}

fn closed() -> Error {
    Error::Io(io::Error::other("archive handle is closed"))
}

fn tree_entry_name(arcname: &str, relative: &Path) -> String {
    let mut name = String::from(arcname);
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_entry_name_joins_with_slashes() {
        let relative = Path::new("sub").join("deep").join("f.txt");
        assert_eq!(tree_entry_name("photos", &relative), "photos/sub/deep/f.txt");
    }

    #[test]
    fn test_tree_entry_name_single_component() {
        assert_eq!(tree_entry_name("photos", Path::new("f.txt")), "photos/f.txt");
    }
}
