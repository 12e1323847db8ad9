//! Configuration error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// Date string is not in `YYYYMMDD` form.
    #[error("Invalid date '{0}', expected YYYYMMDD")]
    InvalidDate(String),
}

/// Error returned when parsing an invalid resolution string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid resolution '{0}', expected one of: second, minute, hour, daily")]
pub struct ResolutionParseError(pub(crate) String);

/// Error returned when parsing an unknown security type tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "unknown security type '{0}', expected one of: \
     base, equity, option, commodity, forex, future, cfd, crypto"
)]
pub struct SecurityTypeParseError(pub(crate) String);
