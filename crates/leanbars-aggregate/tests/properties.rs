//! Property tests for bar aggregation invariants.
//!
//! Uses proptest to verify, for time-ordered input:
//! 1. Partition - every tick lands in exactly one bar, in arrival order
//! 2. Bounds - low <= open, close <= high for every bar
//! 3. Monotonic buckets - bar start times strictly increase
//! 4. Agreement with a group-by reference over the same ticks

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use leanbars_aggregate::aggregate_day;
use leanbars_types::{SecurityType, Symbol, Tick};
use proptest::prelude::*;
use rust_decimal::Decimal;

const DAY_MS: i64 = 86_400_000;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn day_start() -> NaiveDateTime {
    day().and_time(NaiveTime::MIN)
}

fn symbol() -> Symbol {
    Symbol::new("EURUSD", SecurityType::Forex, "oanda")
}

// ── Strategies ──────────────────────────────────────────────────────

fn arb_period_ms() -> impl Strategy<Value = i64> {
    prop_oneof![
        Just(1_000),
        Just(60_000),
        Just(3_600_000),
        Just(DAY_MS),
        Just(7 * 60_000),
        1..5_000_000_i64,
    ]
}

/// Time-ordered ticks: sorted millisecond offsets with bid/ask in pips.
fn arb_ticks() -> impl Strategy<Value = Vec<Tick>> {
    prop::collection::vec((0..DAY_MS, 10_000..20_000_i64, 0..20_i64), 0..300).prop_map(
        |mut raw| {
            raw.sort_by_key(|(ms, _, _)| *ms);
            raw.into_iter()
                .map(|(ms, bid, spread)| {
                    Tick::at_offset(
                        day(),
                        ms,
                        Decimal::new(bid, 4),
                        Decimal::new(bid + spread, 4),
                    )
                    .unwrap()
                })
                .collect()
        },
    )
}

fn bucket_of(tick: &Tick, period_ms: i64) -> NaiveDateTime {
    let offset = (tick.timestamp - day_start()).num_milliseconds();
    day_start() + TimeDelta::milliseconds(offset / period_ms * period_ms)
}

proptest! {
    #[test]
    fn every_tick_lands_in_exactly_one_bar(ticks in arb_ticks(), period_ms in arb_period_ms()) {
        let period = TimeDelta::milliseconds(period_ms);
        let out = aggregate_day(&symbol(), day(), period, &ticks).unwrap();

        let total: u64 = out.bars.iter().map(|b| u64::from(b.tick_count)).sum();
        prop_assert_eq!(total, ticks.len() as u64);
        prop_assert_eq!(out.out_of_order, 0);

        // Walking ticks in order, bar boundaries consume them contiguously.
        let mut idx = 0usize;
        for bar in &out.bars {
            for _ in 0..bar.tick_count {
                prop_assert_eq!(bucket_of(&ticks[idx], period_ms), bar.time);
                idx += 1;
            }
        }
        prop_assert_eq!(idx, ticks.len());
    }

    #[test]
    fn open_and_close_within_extremes(ticks in arb_ticks(), period_ms in arb_period_ms()) {
        let period = TimeDelta::milliseconds(period_ms);
        let out = aggregate_day(&symbol(), day(), period, &ticks).unwrap();

        for bar in &out.bars {
            prop_assert!(bar.is_consistent());
            prop_assert!(bar.tick_count > 0);
        }
    }

    #[test]
    fn bucket_starts_strictly_increase(ticks in arb_ticks(), period_ms in arb_period_ms()) {
        let period = TimeDelta::milliseconds(period_ms);
        let out = aggregate_day(&symbol(), day(), period, &ticks).unwrap();

        for pair in out.bars.windows(2) {
            prop_assert!(pair[0].time < pair[1].time);
        }
        for bar in &out.bars {
            let offset = (bar.time - day_start()).num_milliseconds();
            prop_assert_eq!(offset % period_ms, 0);
        }
    }

    #[test]
    fn matches_group_by_reference(ticks in arb_ticks(), period_ms in arb_period_ms()) {
        let period = TimeDelta::milliseconds(period_ms);
        let out = aggregate_day(&symbol(), day(), period, &ticks).unwrap();

        let mut groups: BTreeMap<NaiveDateTime, Vec<Decimal>> = BTreeMap::new();
        for tick in &ticks {
            groups.entry(bucket_of(tick, period_ms)).or_default().push(tick.price());
        }

        prop_assert_eq!(out.bars.len(), groups.len());
        for (bar, (time, prices)) in out.bars.iter().zip(groups) {
            prop_assert_eq!(bar.time, time);
            prop_assert_eq!(bar.open, prices[0]);
            prop_assert_eq!(bar.close, *prices.last().unwrap());
            prop_assert_eq!(bar.high, prices.iter().copied().max().unwrap());
            prop_assert_eq!(bar.low, prices.iter().copied().min().unwrap());
        }
    }
}
