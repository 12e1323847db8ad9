//! Bar store abstraction.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use leanbars_aggregate::Bar;
use leanbars_types::{Resolution, Symbol};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur while persisting bars.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error on a series file.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Existing series zip could not be read or the new one written.
    #[error("Zip error on '{path}': {source}")]
    Zip {
        /// Path being read or written.
        path: PathBuf,
        /// The underlying zip error.
        source: zip::result::ZipError,
    },

    /// An existing series row could not be parsed while merging.
    #[error("Unparseable row in '{path}': '{row}'")]
    Parse {
        /// Series file path.
        path: PathBuf,
        /// Offending row.
        row: String,
    },

    /// A bar does not belong to the day being written.
    #[error("Bar at {time} does not belong to {day}")]
    ForeignBar {
        /// Day being written.
        day: NaiveDate,
        /// Time of the offending bar.
        time: NaiveDateTime,
    },
}

/// Persists one day of bars for a symbol and resolution.
pub trait BarStore: Send + Sync {
    /// Writes `bars` as the complete content of `day` in the series of
    /// `symbol` at `resolution`, merging with any other days already stored.
    ///
    /// Writing the same day again replaces it, so re-delivery never
    /// duplicates bars.
    ///
    /// # Errors
    ///
    /// Returns an error if the series cannot be read, merged or written.
    fn write(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        day: NaiveDate,
        bars: &[Bar],
    ) -> Result<(), StoreError>;
}

impl<T: BarStore + ?Sized> BarStore for std::sync::Arc<T> {
    fn write(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        day: NaiveDate,
        bars: &[Bar],
    ) -> Result<(), StoreError> {
        (**self).write(symbol, resolution, day, bars)
    }
}

/// Checks that every bar starts within `day`.
///
/// # Errors
///
/// Returns [`StoreError::ForeignBar`] for the first bar outside the day.
pub fn ensure_same_day(day: NaiveDate, bars: &[Bar]) -> Result<(), StoreError> {
    match bars.iter().find(|bar| bar.time.date() != day) {
        Some(bar) => Err(StoreError::ForeignBar {
            day,
            time: bar.time,
        }),
        None => Ok(()),
    }
}

type Series = BTreeMap<NaiveDateTime, Bar>;

/// In-memory bar store keyed by symbol and resolution.
#[derive(Debug, Default)]
pub struct MemoryBarStore {
    series: RwLock<HashMap<(Symbol, Resolution), Series>>,
}

impl MemoryBarStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored series for a symbol and resolution in time order.
    #[must_use]
    pub fn series(&self, symbol: &Symbol, resolution: Resolution) -> Vec<Bar> {
        self.series
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&(symbol.clone(), resolution))
            .map(|s| s.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl BarStore for MemoryBarStore {
    fn write(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        day: NaiveDate,
        bars: &[Bar],
    ) -> Result<(), StoreError> {
        ensure_same_day(day, bars)?;

        let mut all = self
            .series
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let series = all.entry((symbol.clone(), resolution)).or_default();

        let day_start = day.and_time(NaiveTime::MIN);
        let stale: Vec<_> = series
            .range(day_start..)
            .take_while(|(time, _)| time.date() == day)
            .map(|(time, _)| *time)
            .collect();
        for time in stale {
            series.remove(&time);
        }

        series.extend(bars.iter().map(|bar| (bar.time, bar.clone())));
        Ok(())
    }
}
