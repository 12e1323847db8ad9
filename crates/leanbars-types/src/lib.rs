//! Core types for the leanbars tick-to-bar converter.
//!
//! This crate provides the fundamental data structures used throughout leanbars:
//!
//! - [`Tick`] - A single bid/ask quote observation
//! - [`Symbol`] - Instrument identity (ticker, security type, market)
//! - [`SecurityType`] - Security type tag selecting the data layout
//! - [`Resolution`] - Bar resolution
//! - [`DateRange`] - Inclusive range of calendar days

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod date_range;
mod error;
mod resolution;
mod symbol;
mod tick;

pub use date_range::{DATE_FORMAT, DateRange, DayIterator, parse_date};
pub use error::{DateRangeError, ResolutionParseError, SecurityTypeParseError};
pub use resolution::Resolution;
pub use symbol::{SecurityType, Symbol};
pub use tick::{MS_PER_DAY, Tick};
