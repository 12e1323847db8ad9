//! OHLC bar data structure.

use chrono::NaiveDateTime;
use leanbars_types::Symbol;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC bar aggregated from quote ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Instrument the bar belongs to.
    pub symbol: Symbol,
    /// Bucket start (inclusive).
    pub time: NaiveDateTime,
    /// Price of the first tick in the bucket.
    pub open: Decimal,
    /// Highest price in the bucket.
    pub high: Decimal,
    /// Lowest price in the bucket.
    pub low: Decimal,
    /// Price of the last tick in the bucket.
    pub close: Decimal,
    /// Number of ticks folded into the bar.
    pub tick_count: u32,
}

impl Bar {
    /// Returns true if open and close lie within `[low, high]`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leanbars_types::SecurityType;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_bar(open: &str, close: &str) -> Bar {
        let time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Bar {
            symbol: Symbol::new("EURUSD", SecurityType::Forex, "oanda"),
            time,
            open: d(open),
            high: d("1.1050"),
            low: d("1.0980"),
            close: d(close),
            tick_count: 12,
        }
    }

    #[test]
    fn test_is_consistent() {
        assert!(create_test_bar("1.1000", "1.1020").is_consistent());
        assert!(!create_test_bar("1.2000", "1.1020").is_consistent());
    }
}
