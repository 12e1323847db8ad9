//! Per-day reports and run summaries.

use chrono::NaiveDate;
use leanbars_types::{Resolution, Symbol};

use crate::UnitError;

/// What happened to one resolution of a processed day.
#[derive(Debug)]
pub struct ResolutionReport {
    /// The resolution.
    pub resolution: Resolution,
    /// Bars produced by aggregation.
    pub bars: usize,
    /// Ticks dropped for arriving after their bucket closed.
    pub out_of_order: u64,
    /// Aggregation or store failure, if any.
    pub error: Option<UnitError>,
}

impl ResolutionReport {
    /// Returns true if the bars were written.
    #[must_use]
    pub const fn is_written(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of one symbol/day unit.
#[derive(Debug)]
pub enum DayOutcome {
    /// No tick data exists for the day.
    Missing,
    /// Ticks were loaded and every resolution was attempted.
    Processed {
        /// Number of ticks loaded.
        ticks: usize,
        /// One report per configured resolution, in configured order.
        resolutions: Vec<ResolutionReport>,
    },
    /// The day's ticks could not be loaded.
    LoadFailed(UnitError),
}

/// Report for one symbol/day unit.
#[derive(Debug)]
pub struct DayReport {
    /// The symbol.
    pub symbol: Symbol,
    /// The day.
    pub day: NaiveDate,
    /// What happened.
    pub outcome: DayOutcome,
}

impl DayReport {
    /// Returns true if the unit recorded any failure.
    #[must_use]
    pub fn has_failure(&self) -> bool {
        match &self.outcome {
            DayOutcome::Missing => false,
            DayOutcome::Processed { resolutions, .. } => {
                resolutions.iter().any(|r| !r.is_written())
            }
            DayOutcome::LoadFailed(_) => true,
        }
    }
}

/// A failed unit retained in the run summary.
#[derive(Debug)]
pub struct UnitFailure {
    /// The symbol.
    pub symbol: Symbol,
    /// The day, if the failure is tied to one.
    pub day: Option<NaiveDate>,
    /// The resolution, if the failure is tied to one.
    pub resolution: Option<Resolution>,
    /// The error.
    pub error: UnitError,
}

impl std::fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol.ticker())?;
        if let Some(day) = self.day {
            write!(f, " {day}")?;
        }
        if let Some(resolution) = self.resolution {
            write!(f, " {resolution}")?;
        }
        write!(f, ": {}", self.error)
    }
}

/// Totals for a driver run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Days whose ticks were loaded and aggregated.
    pub days_processed: usize,
    /// Days with no tick data.
    pub days_missing: usize,
    /// Days with at least one failure.
    pub days_failed: usize,
    /// Bars successfully handed to the store.
    pub bars_written: usize,
    /// Every failed unit.
    pub failures: Vec<UnitFailure>,
}

impl RunSummary {
    /// Folds a day report into the totals, taking ownership of its errors.
    pub fn record(&mut self, report: DayReport) {
        let DayReport {
            symbol,
            day,
            outcome,
        } = report;

        match outcome {
            DayOutcome::Missing => self.days_missing += 1,
            DayOutcome::LoadFailed(error) => {
                self.days_failed += 1;
                self.failures.push(UnitFailure {
                    symbol,
                    day: Some(day),
                    resolution: None,
                    error,
                });
            }
            DayOutcome::Processed { resolutions, .. } => {
                self.days_processed += 1;
                let mut failed = false;
                for report in resolutions {
                    match report.error {
                        None => self.bars_written += report.bars,
                        Some(error) => {
                            failed = true;
                            self.failures.push(UnitFailure {
                                symbol: symbol.clone(),
                                day: Some(day),
                                resolution: Some(report.resolution),
                                error,
                            });
                        }
                    }
                }
                if failed {
                    self.days_failed += 1;
                }
            }
        }
    }

    /// Adds another summary's totals to this one.
    pub fn merge(&mut self, other: Self) {
        self.days_processed += other.days_processed;
        self.days_missing += other.days_missing;
        self.days_failed += other.days_failed;
        self.bars_written += other.bars_written;
        self.failures.extend(other.failures);
    }

    /// Returns true if no unit failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
