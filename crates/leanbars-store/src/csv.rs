//! LEAN bar CSV rows.

use chrono::{NaiveDateTime, NaiveTime};
use leanbars_aggregate::Bar;
use leanbars_types::{Resolution, SecurityType};
use rust_decimal::Decimal;
use std::io::Write;

/// Time format of hour and daily rows.
pub const LOW_RESOLUTION_TIME_FORMAT: &str = "%Y%m%d %H:%M";

/// CSV formatter for one series' rows.
///
/// Second and minute rows start with the milliseconds since midnight of the
/// bar's day; hour and daily rows start with `yyyyMMdd HH:mm`. The time is
/// followed by `open,high,low,close,volume`.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    resolution: Resolution,
    scale: Decimal,
    integer_prices: bool,
}

impl CsvFormatter {
    /// Creates a formatter for a resolution and security type.
    #[must_use]
    pub fn new(resolution: Resolution, security_type: SecurityType) -> Self {
        let scale = security_type.price_scale();
        Self {
            resolution,
            scale,
            integer_prices: scale != Decimal::ONE,
        }
    }

    /// Formats a single bar as one CSV row, without line terminator.
    #[must_use]
    pub fn format_row(&self, bar: &Bar) -> String {
        let time = if self.resolution.is_high_resolution() {
            let midnight = bar.time.date().and_time(NaiveTime::MIN);
            (bar.time - midnight).num_milliseconds().to_string()
        } else {
            bar.time.format(LOW_RESOLUTION_TIME_FORMAT).to_string()
        };

        // Quote ticks carry no traded volume.
        format!(
            "{time},{},{},{},{},0",
            self.price(bar.open),
            self.price(bar.high),
            self.price(bar.low),
            self.price(bar.close),
        )
    }

    /// Writes bars as CSV rows, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_bars<W: Write>(&self, bars: &[Bar], mut writer: W) -> std::io::Result<()> {
        for bar in bars {
            writeln!(writer, "{}", self.format_row(bar))?;
        }
        Ok(())
    }

    fn price(&self, price: Decimal) -> Decimal {
        let scaled = price * self.scale;
        if self.integer_prices {
            scaled.round()
        } else {
            scaled.normalize()
        }
    }
}

/// Parses the leading time column of an hour or daily row.
#[must_use]
pub fn parse_low_resolution_time(row: &str) -> Option<NaiveDateTime> {
    let time = row.split(',').next()?.trim();
    NaiveDateTime::parse_from_str(time, LOW_RESOLUTION_TIME_FORMAT).ok()
}
