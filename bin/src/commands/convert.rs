//! Convert command implementation.
//!
//! This module turns each symbol's daily quote tick archives into bar series
//! inside the LEAN data folder.

use crate::display::{print_summary, progress_bar};
use anyhow::{Context, Result, bail};
use leanbars_lib::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Inputs of a conversion run.
pub(crate) struct ConvertArgs<'a> {
    pub(crate) symbols: &'a str,
    pub(crate) security_type: SecurityType,
    pub(crate) market: &'a str,
    pub(crate) from: &'a str,
    pub(crate) to: &'a str,
    pub(crate) data_folder: PathBuf,
    pub(crate) resolutions: Vec<Resolution>,
    pub(crate) concurrency: usize,
    pub(crate) quiet: bool,
}

/// Converts every symbol over the date range, then reports failed units.
pub(crate) async fn convert(args: ConvertArgs<'_>) -> Result<()> {
    let symbols = parse_symbols(args.symbols, args.security_type, args.market)?;
    let range = DateRange::parse(args.from, args.to)
        .with_context(|| format!("Invalid date range: {} -> {}", args.from, args.to))?;
    let resolutions = if args.resolutions.is_empty() {
        Resolution::all().to_vec()
    } else {
        args.resolutions
    };

    tracing::info!(
        data_folder = %args.data_folder.display(),
        symbols = symbols.len(),
        %range,
        "starting conversion"
    );

    let source = LeanTickArchive::new(&args.data_folder);
    let store = LeanBarStore::new(&args.data_folder);
    let driver = Arc::new(DayRangeDriver::new(source, store, resolutions)?);

    let total = (symbols.len() * range.total_days()) as u64;
    let progress = progress_bar(total, args.quiet);
    progress.set_message(format!("{range}"));

    let observer = {
        let progress = progress.clone();
        move |report: &DayReport| {
            progress.set_message(format!("{} {}", report.symbol.ticker(), report.day));
            progress.inc(1);
        }
    };
    let summary = driver
        .run_concurrent(symbols, range, args.concurrency, observer)
        .await;

    progress.finish_and_clear();
    print_summary(&summary, args.quiet);

    if !summary.is_success() {
        bail!("{} unit(s) failed", summary.failures.len());
    }
    Ok(())
}

/// Splits a comma-separated symbol list, ignoring blank entries.
fn parse_symbols(list: &str, security_type: SecurityType, market: &str) -> Result<Vec<Symbol>> {
    let symbols: Vec<_> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|ticker| Symbol::new(ticker, security_type, market))
        .collect();

    if symbols.is_empty() {
        bail!("No symbols given");
    }
    Ok(symbols)
}
