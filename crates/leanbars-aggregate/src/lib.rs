//! Tick-to-bar aggregation for the leanbars converter.
//!
//! This crate provides single-day OHLC aggregation:
//!
//! - [`Bar`] - OHLC bar data structure
//! - [`BarAggregator`] - Streaming aggregator for one day and one period
//! - [`aggregate_day`] - One forward pass over a day's ticks

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;

pub use aggregator::{AggregateError, BarAggregator, DayBars, aggregate_day, validate_period};
pub use bar::Bar;
