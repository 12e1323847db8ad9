//! Tick source for the leanbars converter.
//!
//! This crate provides the tick loading pipeline:
//!
//! - [`path::quote_archive_path`] - Locates a day's quote archive
//! - [`decompress::decompress_first_entry`] - Zip decompression
//! - [`parse::parse_ticks`] - Quote line parsing
//! - [`TickSource`] - Loading contract, with [`LeanTickArchive`] and
//!   [`MemoryTickSource`] implementations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/leanbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod decompress;
pub mod parse;
pub mod path;
mod source;

pub use decompress::DecompressError;
pub use parse::{ParseError, QuoteLayout};
pub use source::{LeanTickArchive, MemoryTickSource, SourceError, TickSource};
