//! Quote tick representation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Milliseconds in one calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// A single bid/ask quote observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Time of the quote, in the archive's data time zone.
    pub timestamp: NaiveDateTime,
    /// Bid price.
    pub bid: Decimal,
    /// Ask (offer) price.
    pub ask: Decimal,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, bid: Decimal, ask: Decimal) -> Self {
        Self {
            timestamp,
            bid,
            ask,
        }
    }

    /// Creates a tick from a millisecond offset since midnight of `day`.
    ///
    /// This is how quote archives address time: each line carries the
    /// milliseconds elapsed since the start of the file's day. Returns `None`
    /// unless `0 <= ms_offset < MS_PER_DAY`.
    #[must_use]
    pub fn at_offset(day: NaiveDate, ms_offset: i64, bid: Decimal, ask: Decimal) -> Option<Self> {
        if !(0..MS_PER_DAY).contains(&ms_offset) {
            return None;
        }
        let timestamp = day
            .and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::milliseconds(ms_offset))?;
        Some(Self::new(timestamp, bid, ask))
    }

    /// Returns the price used for bar aggregation: the bid/ask midpoint.
    #[must_use]
    pub fn price(&self) -> Decimal {
        match self.bid.checked_add(self.ask) {
            Some(sum) => sum / Decimal::TWO,
            // Same-signed extremes: the difference cannot overflow.
            None => self.bid + (self.ask - self.bid) / Decimal::TWO,
        }
    }
}
