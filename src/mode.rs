//! Archive open modes.

use std::str::FromStr;

use crate::error::Error;

/// The set of supported open modes, as shown in error messages.
pub const SUPPORTED_MODES: &str = "r, w, a";

/// How an archive is opened.
///
/// Read maps to [`Archive`](crate::Archive); write and append map to
/// [`Writer`](crate::Writer). Append is rejected at open time when the
/// target already carries a sealed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Open an existing archive for reading.
    #[default]
    Read,
    /// Create a new archive, replacing any existing file on close.
    Write,
    /// Add entries to an existing plain archive.
    Append,
}

impl OpenMode {
    /// Returns the single-letter mode string (`r`, `w` or `a`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::Append => "a",
        }
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "a" => Ok(Self::Append),
            other => Err(Error::UnsupportedMode {
                mode: other.into(),
                supported: SUPPORTED_MODES,
            }),
        }
    }
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
