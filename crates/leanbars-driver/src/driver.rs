//! Day-range orchestration.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use leanbars_aggregate::{aggregate_day, validate_period};
use leanbars_archive::TickSource;
use leanbars_store::BarStore;
use leanbars_types::{DateRange, Resolution, Symbol, Tick};
use std::sync::Arc;

use crate::{
    DayOutcome, DayReport, DriverError, ResolutionReport, RunSummary, UnitError, UnitFailure,
};

/// Converts tick archives into bar series over a date range.
///
/// Every `(symbol, day)` unit loads the day's ticks once, aggregates them at
/// each configured resolution in order and writes each resolution's bars to
/// the store. A failing unit is recorded and the run moves on.
#[derive(Debug)]
pub struct DayRangeDriver<S, B> {
    source: S,
    store: B,
    resolutions: Vec<Resolution>,
}

impl<S: TickSource, B: BarStore> DayRangeDriver<S, B> {
    /// Creates a driver over a tick source, a bar store and an ordered
    /// resolution set.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoResolutions`] if `resolutions` is empty and
    /// [`DriverError::Resolution`] if a resolution cannot be aggregated.
    pub fn new(source: S, store: B, resolutions: Vec<Resolution>) -> Result<Self, DriverError> {
        if resolutions.is_empty() {
            return Err(DriverError::NoResolutions);
        }

        for &resolution in &resolutions {
            validate_period(resolution.duration())
                .map_err(|source| DriverError::Resolution { resolution, source })?;
        }

        Ok(Self {
            source,
            store,
            resolutions,
        })
    }

    /// Returns the configured resolutions in processing order.
    #[must_use]
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Runs every symbol over the range, one after the other.
    pub fn run(&self, symbols: &[Symbol], range: DateRange) -> RunSummary {
        self.run_with(symbols, range, |_| {})
    }

    /// Runs every symbol over the range, calling `observer` after each day.
    pub fn run_with<F>(&self, symbols: &[Symbol], range: DateRange, mut observer: F) -> RunSummary
    where
        F: FnMut(&DayReport),
    {
        let mut summary = RunSummary::default();
        for symbol in symbols {
            summary.merge(self.run_symbol(symbol, range, &mut observer));
        }
        summary
    }

    /// Runs one symbol over the range in ascending day order.
    pub fn run_symbol(
        &self,
        symbol: &Symbol,
        range: DateRange,
        observer: &mut dyn FnMut(&DayReport),
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for day in range.days() {
            let report = self.process_day(symbol, day);
            observer(&report);
            summary.record(report);
        }
        tracing::info!(
            symbol = %symbol,
            processed = summary.days_processed,
            missing = summary.days_missing,
            failed = summary.days_failed,
            "symbol complete"
        );
        summary
    }

    /// Loads, aggregates and stores one symbol/day unit.
    pub fn process_day(&self, symbol: &Symbol, day: NaiveDate) -> DayReport {
        let outcome = match self.source.load_ticks(symbol, day) {
            Err(e) => {
                tracing::warn!(symbol = %symbol, %day, error = %e, "failed to load ticks");
                DayOutcome::LoadFailed(UnitError::from(e))
            }
            Ok(ticks) if ticks.is_empty() => {
                tracing::debug!(symbol = %symbol, %day, "no ticks, skipping day");
                DayOutcome::Missing
            }
            Ok(ticks) => {
                let resolutions = self
                    .resolutions
                    .iter()
                    .map(|&resolution| self.convert(symbol, day, resolution, &ticks))
                    .collect();
                tracing::info!(symbol = %symbol, %day, ticks = ticks.len(), "processed day");
                DayOutcome::Processed {
                    ticks: ticks.len(),
                    resolutions,
                }
            }
        };

        DayReport {
            symbol: symbol.clone(),
            day,
            outcome,
        }
    }

    fn convert(
        &self,
        symbol: &Symbol,
        day: NaiveDate,
        resolution: Resolution,
        ticks: &[Tick],
    ) -> ResolutionReport {
        let day_bars = match aggregate_day(symbol, day, resolution.duration(), ticks.iter()) {
            Ok(day_bars) => day_bars,
            Err(e) => {
                return ResolutionReport {
                    resolution,
                    bars: 0,
                    out_of_order: 0,
                    error: Some(e.into()),
                };
            }
        };

        if day_bars.out_of_order > 0 {
            tracing::warn!(
                symbol = %symbol,
                %day,
                %resolution,
                dropped = day_bars.out_of_order,
                "dropped out-of-order ticks"
            );
        }

        let error = self
            .store
            .write(symbol, resolution, day, &day_bars.bars)
            .err()
            .map(UnitError::from);
        if let Some(e) = &error {
            tracing::warn!(symbol = %symbol, %day, %resolution, error = %e, "failed to store bars");
        }

        ResolutionReport {
            resolution,
            bars: day_bars.bars.len(),
            out_of_order: day_bars.out_of_order,
            error,
        }
    }
}

impl<S, B> DayRangeDriver<S, B>
where
    S: TickSource + 'static,
    B: BarStore + 'static,
{
    /// Runs symbols in parallel on the blocking pool, at most `concurrency`
    /// at a time. Each symbol's days are processed in ascending order.
    ///
    /// `observer` is called from worker threads as days complete.
    pub async fn run_concurrent<F>(
        self: Arc<Self>,
        symbols: Vec<Symbol>,
        range: DateRange,
        concurrency: usize,
        observer: F,
    ) -> RunSummary
    where
        F: Fn(&DayReport) + Send + Sync + 'static,
    {
        let observer = Arc::new(observer);

        let mut results = stream::iter(symbols)
            .map(|symbol| {
                let driver = Arc::clone(&self);
                let observer = Arc::clone(&observer);
                let worker_symbol = symbol.clone();
                async move {
                    let handle = tokio::task::spawn_blocking(move || {
                        driver.run_symbol(&worker_symbol, range, &mut |report| (*observer)(report))
                    });
                    (symbol, handle.await)
                }
            })
            .buffer_unordered(concurrency.max(1));

        let mut summary = RunSummary::default();
        while let Some((symbol, result)) = results.next().await {
            match result {
                Ok(symbol_summary) => summary.merge(symbol_summary),
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "symbol worker failed");
                    summary.failures.push(UnitFailure {
                        symbol,
                        day: None,
                        resolution: None,
                        error: UnitError::Worker(e.to_string()),
                    });
                }
            }
        }
        summary
    }
}
