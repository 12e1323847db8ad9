//! Quote tick line parsing.

use chrono::NaiveDate;
use leanbars_types::{MS_PER_DAY, SecurityType, Tick};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during tick parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Line has fewer columns than the layout requires.
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        /// One-based line number.
        line: usize,
        /// Columns required by the layout.
        expected: usize,
        /// Columns present.
        found: usize,
    },

    /// Time column is not a millisecond offset.
    #[error("line {line}: invalid time offset '{value}'")]
    InvalidTime {
        /// One-based line number.
        line: usize,
        /// Offending value.
        value: String,
    },

    /// Price column is not a decimal number.
    #[error("line {line}: invalid price '{value}'")]
    InvalidPrice {
        /// One-based line number.
        line: usize,
        /// Offending value.
        value: String,
    },
}

impl ParseError {
    /// Returns the one-based line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingColumns { line, .. }
            | Self::InvalidTime { line, .. }
            | Self::InvalidPrice { line, .. } => *line,
        }
    }
}

/// Column layout of a quote tick line.
///
/// Every layout starts with the millisecond offset from midnight of the
/// file's day. Forex, CFD and crypto lines continue `bid,ask`; equity and
/// option lines continue `bid,bid_size,ask,ask_size,...` with prices scaled
/// by the security type's price scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteLayout {
    bid_column: usize,
    ask_column: usize,
    scale: Decimal,
}

impl QuoteLayout {
    /// Returns the layout used by archives of the given security type.
    #[must_use]
    pub fn for_security_type(security_type: SecurityType) -> Self {
        match security_type {
            SecurityType::Equity | SecurityType::Option => Self {
                bid_column: 1,
                ask_column: 3,
                scale: security_type.price_scale(),
            },
            _ => Self {
                bid_column: 1,
                ask_column: 2,
                scale: security_type.price_scale(),
            },
        }
    }

    const fn columns(&self) -> usize {
        if self.bid_column > self.ask_column {
            self.bid_column + 1
        } else {
            self.ask_column + 1
        }
    }
}

/// Parses every quote line of a day's archive.
///
/// Blank lines are skipped. The first malformed line aborts the whole day.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
pub fn parse_ticks(
    content: &str,
    day: NaiveDate,
    layout: QuoteLayout,
) -> Result<Vec<Tick>, ParseError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(line, idx + 1, day, layout))
        .collect()
}

/// Parses a single quote line.
///
/// # Errors
///
/// Returns an error if the line is too short or a field is malformed.
pub fn parse_line(
    line: &str,
    line_number: usize,
    day: NaiveDate,
    layout: QuoteLayout,
) -> Result<Tick, ParseError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() < layout.columns() {
        return Err(ParseError::MissingColumns {
            line: line_number,
            expected: layout.columns(),
            found: fields.len(),
        });
    }

    let invalid_time = || ParseError::InvalidTime {
        line: line_number,
        value: fields[0].to_string(),
    };
    let ms_offset = parse_offset(fields[0]).ok_or_else(invalid_time)?;
    let bid = parse_price(fields[layout.bid_column], line_number)? / layout.scale;
    let ask = parse_price(fields[layout.ask_column], line_number)? / layout.scale;

    Tick::at_offset(day, ms_offset, bid, ask).ok_or_else(invalid_time)
}

/// Parses a millisecond offset within the day, accepting a trailing `.0`.
fn parse_offset(value: &str) -> Option<i64> {
    let ms = match value.parse::<i64>() {
        Ok(ms) => ms,
        Err(_) => {
            let ms = Decimal::from_str(value).ok()?;
            if !ms.fract().is_zero() {
                return None;
            }
            ms.to_i64()?
        }
    };
    (0..MS_PER_DAY).contains(&ms).then_some(ms)
}

fn parse_price(value: &str, line: usize) -> Result<Decimal, ParseError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| ParseError::InvalidPrice {
            line,
            value: value.to_string(),
        })
}
