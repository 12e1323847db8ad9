//! Driver error types.

use leanbars_aggregate::AggregateError;
use leanbars_archive::SourceError;
use leanbars_store::StoreError;
use leanbars_types::Resolution;
use thiserror::Error;

/// Configuration errors detected before any day is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The resolution set is empty.
    #[error("At least one resolution must be configured")]
    NoResolutions,

    /// A resolution has an unusable bucket duration.
    #[error("Resolution {resolution}: {source}")]
    Resolution {
        /// The rejected resolution.
        resolution: Resolution,
        /// The aggregator's rejection.
        source: AggregateError,
    },
}

/// Failure of one symbol/day (or symbol/day/resolution) unit of work.
#[derive(Error, Debug)]
pub enum UnitError {
    /// The tick source failed to load the day.
    #[error(transparent)]
    Load(#[from] SourceError),

    /// Aggregation rejected the resolution.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The bar store failed to persist the bars.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The worker running the unit stopped unexpectedly.
    #[error("Worker failed: {0}")]
    Worker(String),
}
