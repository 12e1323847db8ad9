//! Streaming tick-to-bar aggregation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use leanbars_types::{Symbol, Tick};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::Bar;

/// Errors that can occur when configuring an aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// Bucket duration is zero, negative, or shorter than a millisecond.
    #[error("Invalid resolution: bucket duration must be at least 1ms, got {0:?}")]
    InvalidResolution(TimeDelta),
}

/// Streaming tick aggregator for a single trading day.
///
/// Buckets are aligned to multiples of the period measured from midnight of
/// the day, so periods that do not divide a day still yield boundaries at
/// `day_start + k * period`. Only the bucket currently being filled is held
/// in memory.
#[derive(Debug)]
pub struct BarAggregator {
    symbol: Symbol,
    day_start: NaiveDateTime,
    period_ms: i64,
    current_bar: Option<BarBuilder>,
    out_of_order: u64,
}

impl BarAggregator {
    /// Creates a new aggregator for `symbol` on `day` with the given bucket duration.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidResolution`] if `period` is shorter than 1ms.
    pub fn new(symbol: Symbol, day: NaiveDate, period: TimeDelta) -> Result<Self, AggregateError> {
        let period_ms = validate_period(period)?;
        Ok(Self {
            symbol,
            day_start: day.and_time(NaiveTime::MIN),
            period_ms,
            current_bar: None,
            out_of_order: 0,
        })
    }

    /// Returns the bucket duration.
    #[must_use]
    pub fn period(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.period_ms)
    }

    /// Returns the number of ticks dropped because they belonged to a bucket
    /// that had already been closed.
    #[must_use]
    pub const fn out_of_order(&self) -> u64 {
        self.out_of_order
    }

    /// Processes a tick, potentially emitting a completed bar.
    ///
    /// Returns `Some(bar)` when this tick opens a later bucket and thereby
    /// completes the previous one, `None` otherwise.
    pub fn push(&mut self, tick: &Tick) -> Option<Bar> {
        let bucket_start = self.bucket_start_for(tick.timestamp);
        let price = tick.price();

        match self.current_bar.take() {
            Some(mut builder) if builder.time == bucket_start => {
                builder.update(price);
                self.current_bar = Some(builder);
                None
            }
            Some(builder) if bucket_start < builder.time => {
                // Closed buckets are never reopened.
                self.out_of_order += 1;
                self.current_bar = Some(builder);
                None
            }
            Some(builder) => {
                let completed = builder.finish(&self.symbol);
                self.current_bar = Some(BarBuilder::new(bucket_start, price));
                Some(completed)
            }
            None => {
                self.current_bar = Some(BarBuilder::new(bucket_start, price));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial bar.
    #[must_use]
    pub fn finish(self) -> Option<Bar> {
        let symbol = self.symbol;
        self.current_bar.map(|b| b.finish(&symbol))
    }

    /// Floors a timestamp to its bucket boundary relative to the day start.
    fn bucket_start_for(&self, timestamp: NaiveDateTime) -> NaiveDateTime {
        let offset_ms = (timestamp - self.day_start).num_milliseconds();
        let bucket = offset_ms.div_euclid(self.period_ms);
        self.day_start + TimeDelta::milliseconds(bucket * self.period_ms)
    }
}

/// Checks that `period` can be used as a bucket duration, returning it in
/// whole milliseconds.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidResolution`] if `period` is shorter than 1ms.
pub fn validate_period(period: TimeDelta) -> Result<i64, AggregateError> {
    let period_ms = period.num_milliseconds();
    if period_ms <= 0 {
        return Err(AggregateError::InvalidResolution(period));
    }
    Ok(period_ms)
}

/// Result of aggregating one day at one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBars {
    /// Completed bars in ascending bucket order.
    pub bars: Vec<Bar>,
    /// Ticks dropped for arriving after their bucket closed.
    pub out_of_order: u64,
}

/// Aggregates one day's ticks into bars in a single forward pass.
///
/// Ticks are expected in time order. A tick whose bucket precedes the bucket
/// being filled is dropped and counted in [`DayBars::out_of_order`] rather
/// than folded into its closed bar.
///
/// # Errors
///
/// Returns [`AggregateError::InvalidResolution`] if `period` is shorter than 1ms.
pub fn aggregate_day<'a, I>(
    symbol: &Symbol,
    day: NaiveDate,
    period: TimeDelta,
    ticks: I,
) -> Result<DayBars, AggregateError>
where
    I: IntoIterator<Item = &'a Tick>,
{
    let mut aggregator = BarAggregator::new(symbol.clone(), day, period)?;
    let mut bars = Vec::new();

    for tick in ticks {
        if let Some(bar) = aggregator.push(tick) {
            bars.push(bar);
        }
    }

    let out_of_order = aggregator.out_of_order();
    if let Some(bar) = aggregator.finish() {
        bars.push(bar);
    }

    Ok(DayBars { bars, out_of_order })
}

/// Builder for the bar currently being filled.
#[derive(Debug)]
struct BarBuilder {
    time: NaiveDateTime,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a new builder from the first tick's price.
    const fn new(time: NaiveDateTime, price: Decimal) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            tick_count: 1,
        }
    }

    fn update(&mut self, price: Decimal) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.tick_count += 1;
    }

    fn finish(self, symbol: &Symbol) -> Bar {
        Bar {
            symbol: symbol.clone(),
            time: self.time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            tick_count: self.tick_count,
        }
    }
}
