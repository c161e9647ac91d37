//! Shared test utilities for integration tests.
//!
//! Fixture builders are consolidated here so individual test files can
//! construct plain and sealed-looking archives without repeating the
//! `zip` plumbing.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;

fn stored() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored)
}

/// Builds a plain in-memory ZIP from (name, data) pairs.
pub fn plain_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut cursor);
        for (name, data) in entries {
            writer.start_file(*name, stored()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

/// Builds an outer in-memory ZIP with a mix of encrypted and plain
/// entries, mirroring what the sealing backend produces (stored entries,
/// legacy ZipCrypto encryption).
pub fn outer_zip(
    password: &str,
    encrypted: &[(&str, &[u8])],
    plain: &[(&str, &[u8])],
) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = ZipWriter::new(&mut cursor);
        for (name, data) in encrypted {
            let options = stored().with_deprecated_encryption(password.as_bytes());
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        for (name, data) in plain {
            writer.start_file(*name, stored()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

/// Builds a sealed-looking archive: `payload_entries` become a plain
/// inner ZIP stored under `payload_name` with its encryption flag set,
/// and every side entry sits alongside it, all encrypted with `password`.
pub fn sealed_zip(
    payload_name: &str,
    payload_entries: &[(&str, &[u8])],
    sides: &[(&str, &[u8])],
    password: &str,
) -> Vec<u8> {
    let inner = plain_zip(payload_entries);
    let mut encrypted: Vec<(&str, &[u8])> = vec![(payload_name, inner.as_slice())];
    encrypted.extend(sides.iter().copied());
    outer_zip(password, &encrypted, &[])
}

/// Creates the given (relative path, data) files under `root`, creating
/// parent directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, data) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }
}

/// Extracts the error from a Result, panicking if it's Ok.
pub fn expect_err<T, E>(result: Result<T, E>) -> E {
    match result {
        Ok(_) => panic!("Expected error but got Ok"),
        Err(e) => e,
    }
}

/// Sorted copy of a name list, for order-insensitive comparisons.
pub fn sorted(names: Vec<String>) -> Vec<String> {
    let mut names = names;
    names.sort();
    names
}
