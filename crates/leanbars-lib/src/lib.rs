//! Convert LEAN quote tick archives into OHLC bar series.
//!
//! This is a facade crate that re-exports functionality from the leanbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use leanbars_lib::prelude::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let symbol = Symbol::new("EURUSD", SecurityType::Forex, "oanda");
//! let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//!
//! let source = MemoryTickSource::new();
//! source.insert(&symbol, day, vec![
//!     Tick::at_offset(day, 34_200_100, Decimal::new(10999, 4), Decimal::new(11001, 4)).unwrap(),
//! ]);
//!
//! let driver = DayRangeDriver::new(source, MemoryBarStore::new(), vec![Resolution::Minute])?;
//! let summary = driver.run(&[symbol], DateRange::single_day(day));
//! assert_eq!(summary.bars_written, 1);
//! # Ok::<(), DriverError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use leanbars_types::*;

// Re-export tick sources
#[cfg(feature = "archive")]
pub use leanbars_archive::{
    DecompressError, LeanTickArchive, MemoryTickSource, ParseError, QuoteLayout, SourceError,
    TickSource,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use leanbars_aggregate::{AggregateError, Bar, BarAggregator, DayBars, aggregate_day};

// Re-export bar stores
#[cfg(feature = "store")]
pub use leanbars_store::{BarStore, CsvFormatter, LeanBarStore, MemoryBarStore, StoreError};

// Re-export orchestration
#[cfg(feature = "driver")]
pub use leanbars_driver::{
    DayOutcome, DayRangeDriver, DayReport, DriverError, ResolutionReport, RunSummary, UnitError,
    UnitFailure,
};

/// Prelude module for convenient imports.
///
/// ```
/// use leanbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use leanbars_types::{DateRange, DateRangeError, Resolution, SecurityType, Symbol, Tick};

    #[cfg(feature = "archive")]
    pub use leanbars_archive::{LeanTickArchive, MemoryTickSource, TickSource};

    #[cfg(feature = "aggregate")]
    pub use leanbars_aggregate::{Bar, BarAggregator, aggregate_day};

    #[cfg(feature = "store")]
    pub use leanbars_store::{BarStore, LeanBarStore, MemoryBarStore};

    #[cfg(feature = "driver")]
    pub use leanbars_driver::{DayRangeDriver, DayReport, DriverError, RunSummary};
}
