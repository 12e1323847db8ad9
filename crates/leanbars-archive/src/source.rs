//! Tick source abstraction and the on-disk archive implementation.

use chrono::NaiveDate;
use leanbars_types::{Symbol, Tick};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

use crate::decompress::{DecompressError, decompress_first_entry};
use crate::parse::{ParseError, QuoteLayout, parse_ticks};
use crate::path::quote_archive_path;

/// Errors that can occur while loading a day of ticks.
///
/// A missing archive is not an error; sources return an empty sequence.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The archive exists but could not be opened.
    #[error("Failed to open '{path}': {source}")]
    Open {
        /// Archive path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The archive could not be decompressed.
    #[error("Failed to decompress '{path}': {source}")]
    Decompress {
        /// Archive path.
        path: PathBuf,
        /// The underlying decompression error.
        source: DecompressError,
    },

    /// A tick line is malformed.
    #[error("Corrupt tick data in '{path}': {source}")]
    Parse {
        /// Archive path.
        path: PathBuf,
        /// The underlying parse error.
        source: ParseError,
    },
}

/// Supplies the ticks recorded for a symbol on a given day.
pub trait TickSource: Send + Sync {
    /// Loads one day's ticks in arrival order.
    ///
    /// Returns an empty vector when no data exists for the day.
    ///
    /// # Errors
    ///
    /// Returns an error only when existing data is unreadable or corrupt.
    fn load_ticks(&self, symbol: &Symbol, day: NaiveDate) -> Result<Vec<Tick>, SourceError>;
}

impl<T: TickSource + ?Sized> TickSource for std::sync::Arc<T> {
    fn load_ticks(&self, symbol: &Symbol, day: NaiveDate) -> Result<Vec<Tick>, SourceError> {
        (**self).load_ticks(symbol, day)
    }
}

/// Reads zipped quote archives from a data folder.
#[derive(Debug, Clone)]
pub struct LeanTickArchive {
    data_folder: PathBuf,
}

impl LeanTickArchive {
    /// Creates an archive reader rooted at `data_folder`.
    #[must_use]
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
        }
    }

    /// Returns the data folder.
    #[must_use]
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Returns the archive path for a symbol and day.
    #[must_use]
    pub fn archive_path(&self, symbol: &Symbol, day: NaiveDate) -> PathBuf {
        quote_archive_path(&self.data_folder, symbol, day)
    }
}

impl TickSource for LeanTickArchive {
    fn load_ticks(&self, symbol: &Symbol, day: NaiveDate) -> Result<Vec<Tick>, SourceError> {
        let path = self.archive_path(symbol, day);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "no tick archive");
                return Ok(Vec::new());
            }
            Err(source) => return Err(SourceError::Open { path, source }),
        };

        let content = match decompress_first_entry(BufReader::new(file)) {
            Ok(content) => content,
            Err(source) => return Err(SourceError::Decompress { path, source }),
        };

        let layout = QuoteLayout::for_security_type(symbol.security_type());
        match parse_ticks(&content, day, layout) {
            Ok(ticks) => {
                tracing::debug!(path = %path.display(), ticks = ticks.len(), "loaded tick archive");
                Ok(ticks)
            }
            Err(source) => Err(SourceError::Parse { path, source }),
        }
    }
}

/// In-memory tick source keyed by symbol and day.
#[derive(Debug, Default)]
pub struct MemoryTickSource {
    days: RwLock<HashMap<(Symbol, NaiveDate), Vec<Tick>>>,
}

impl MemoryTickSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the ticks for a symbol and day, replacing any previous entry.
    pub fn insert(&self, symbol: &Symbol, day: NaiveDate, ticks: Vec<Tick>) {
        self.days
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert((symbol.clone(), day), ticks);
    }
}

impl TickSource for MemoryTickSource {
    fn load_ticks(&self, symbol: &Symbol, day: NaiveDate) -> Result<Vec<Tick>, SourceError> {
        let days = self
            .days
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(days
            .get(&(symbol.clone(), day))
            .cloned()
            .unwrap_or_default())
    }
}
