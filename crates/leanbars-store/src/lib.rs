//! Bar series storage for the leanbars converter.
//!
//! This crate provides the persistence side of the pipeline:
//!
//! - [`BarStore`] - Idempotent per-day write contract
//! - [`LeanBarStore`] - Zipped CSV series in a LEAN-style data folder
//! - [`MemoryBarStore`] - In-memory series for tests and dry runs
//! - [`CsvFormatter`] - LEAN bar row format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod lean;
mod store;

pub use crate::csv::{CsvFormatter, LOW_RESOLUTION_TIME_FORMAT, parse_low_resolution_time};
pub use lean::{LeanBarStore, SeriesLocation, series_location};
pub use store::{BarStore, MemoryBarStore, StoreError, ensure_same_day};
