//! Day-range orchestration for the leanbars converter.
//!
//! - [`DayRangeDriver`] - Loads, aggregates and stores every symbol/day unit
//! - [`RunSummary`] - Totals and isolated failures of a run
//! - [`DayReport`] - What happened to one symbol/day unit

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod driver;
mod error;
mod report;

pub use driver::DayRangeDriver;
pub use error::{DriverError, UnitError};
pub use report::{DayOutcome, DayReport, ResolutionReport, RunSummary, UnitFailure};
