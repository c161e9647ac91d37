//! # zipseal
//!
//! Password-sealed ZIP archives with a hidden-payload convention.
//!
//! A sealed archive is an ordinary-looking ZIP produced by the 7-Zip
//! command-line tool: it contains the real archive as a single encrypted
//! nested `.zip` entry (the *payload*) next to unrelated *side files*.
//! Reading one back, the payload is detected, lazily extracted into
//! memory and all entry operations are transparently redirected to it,
//! while the `side_*` accessors expose the outer archive's remaining
//! entries.
//!
//! Writing and in-process reading use the [`zip`] crate; sealing and
//! optional backend-side extraction shell out to 7-Zip (see
//! [`Backend`]).
//!
//! ## Writing a sealed archive
//!
//! ```rust,no_run
//! use zipseal::{WriteOptions, Writer};
//!
//! fn main() -> zipseal::Result<()> {
//!     let options = WriteOptions::new().password("secret");
//!     let mut writer = Writer::create_path_with("vault.zip", options)?;
//!     writer.add_bytes("img01.jpg", b"...")?;
//!     writer.add_side_file("img02.jpg");
//!     writer.close()?; // seals through the backend
//!     Ok(())
//! }
//! ```
//!
//! ## Reading it back
//!
//! ```rust,no_run
//! use zipseal::{Archive, OpenOptions};
//!
//! fn main() -> zipseal::Result<()> {
//!     let options = OpenOptions::new().password("secret");
//!     let mut archive = Archive::open_path_with("vault.zip", options)?;
//!
//!     // redirected to the payload
//!     assert_eq!(archive.names()?, ["img01.jpg"]);
//!
//!     // the outer archive's other entries
//!     assert_eq!(archive.side_names(), ["img02.jpg"]);
//!     Ok(())
//! }
//! ```
//!
//! Archives written without a password stay plain ZIPs and read back
//! without any redirection, so the same API covers both cases.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `aes` | No | Read AES-encrypted payload entries (7z `-mem=AES256`) |

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod backend;
pub mod error;
pub mod mode;
pub mod password;
pub mod read;
pub mod write;

mod scratch;

pub use backend::Backend;
pub use error::{Error, Result};
pub use mode::OpenMode;
pub use password::Password;

// Re-export reading API at crate root for convenience
pub use read::{Archive, EntryInfo, OpenOptions};

// Re-export writing API at crate root for convenience
pub use write::{Compression, WriteOptions, Writer};
