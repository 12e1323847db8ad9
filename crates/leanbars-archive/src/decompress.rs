//! Zip decompression for quote archives.

use std::io::{Read, Seek};
use thiserror::Error;
use zip::ZipArchive;

/// Errors that can occur during decompression.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// The zip container could not be read.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The entry could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive holds no entries.
    #[error("Archive contains no entries")]
    EmptyArchive,
}

/// Decompresses the first entry of a zip archive into a string.
///
/// Quote archives hold a single CSV entry; any further entries are ignored.
///
/// # Errors
///
/// Returns an error if the container is corrupt, empty, or the entry is not UTF-8.
pub fn decompress_first_entry<R: Read + Seek>(reader: R) -> Result<String, DecompressError> {
    let mut archive = ZipArchive::new(reader)?;
    if archive.is_empty() {
        return Err(DecompressError::EmptyArchive);
    }

    // The declared size comes from the header and is not trusted for allocation.
    let mut entry = archive.by_index(0)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;

    Ok(content)
}
