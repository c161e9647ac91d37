//! Invocation of the external archiver backend.
//!
//! Sealing and backend-side payload extraction shell out to the 7-Zip
//! command-line tool. The backend runs as a blocking subprocess: the call
//! waits for completion and only the exit status and captured standard
//! error are consulted. By 7-Zip's own convention an exit status of 0 or 1
//! means success (1 is "completed with warnings"); anything above 1 is a
//! failure.
//!
//! The program location is injected configuration, not a hardcoded
//! constant: construct with [`Backend::new`] or resolve it at startup with
//! [`Backend::from_env`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::password::Password;

/// Environment variable consulted by [`Backend::from_env`].
pub const PROGRAM_ENV: &str = "ZIPSEAL_7Z";

const DEFAULT_PROGRAM: &str = "7z";

/// Handle to the external archiver program.
#[derive(Debug, Clone)]
pub struct Backend {
    program: PathBuf,
}

impl Backend {
    /// Creates a backend invoking the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolves the program from the `ZIPSEAL_7Z` environment variable,
    /// falling back to `7z` on `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(PROGRAM_ENV) {
            Some(program) => Self::new(PathBuf::from(program)),
            None => Self::new(DEFAULT_PROGRAM),
        }
    }

    /// Returns the program this backend invokes.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds `dest` containing every path in `inputs` as sibling entries,
    /// stored uncompressed, the whole archive encrypted with `password`.
    pub fn add(&self, dest: &Path, password: &Password, inputs: &[PathBuf]) -> Result<()> {
        log::debug!(
            "backend add: {} -> {} ({} inputs)",
            self.program.display(),
            dest.display(),
            inputs.len()
        );
        self.run(add_args(dest, password, inputs))
    }

    /// Extracts the named entry of `archive` into `dest_dir`, decrypting
    /// with `password`. Directory structure is not recreated; the entry
    /// lands directly under `dest_dir`.
    pub fn extract(
        &self,
        archive: &Path,
        entry: &str,
        password: &Password,
        dest_dir: &Path,
    ) -> Result<()> {
        log::debug!(
            "backend extract: {} '{}' from {} -> {}",
            self.program.display(),
            entry,
            archive.display(),
            dest_dir.display()
        );
        self.run(extract_args(archive, entry, password, dest_dir))
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        let output = Command::new(&self.program).args(&args).output()?;
        check_status(output.status.code(), &output.stderr)
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::from_env()
    }
}

/// `a -y -mx=0 -p<pwd> <dest> <inputs...>`
fn add_args(dest: &Path, password: &Password, inputs: &[PathBuf]) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "a".into(),
        "-y".into(),
        // store only, no compression
        "-mx=0".into(),
        password_switch(password),
        dest.into(),
    ];
    args.extend(inputs.iter().map(OsString::from));
    args
}

/// `e -y -r -p<pwd> -o<dest_dir> <archive> <entry>`
fn extract_args(archive: &Path, entry: &str, password: &Password, dest_dir: &Path) -> Vec<OsString> {
    vec![
        "e".into(),
        "-y".into(),
        "-r".into(),
        password_switch(password),
        output_switch(dest_dir),
        archive.into(),
        entry.into(),
    ]
}

// The password travels inside the switch, never via stdin or environment.
fn password_switch(password: &Password) -> OsString {
    let mut switch = OsString::from("-p");
    switch.push(password.as_str());
    switch
}

fn output_switch(dest_dir: &Path) -> OsString {
    let mut switch = OsString::from("-o");
    switch.push(dest_dir);
    switch
}

fn check_status(code: Option<i32>, stderr: &[u8]) -> Result<()> {
    match code {
        Some(status) if status <= 1 => Ok(()),
        code => Err(Error::Backend {
            status: code.unwrap_or(-1),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }),
    }
}
