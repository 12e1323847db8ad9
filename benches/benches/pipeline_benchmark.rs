//! End-to-end conversion of one archived day: unzip, parse, aggregate at
//! every resolution and write the LEAN bar files.
//!
//! Run with: `cargo bench --package leanbars-bench --bench pipeline_benchmark`

use chrono::NaiveDate;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use leanbars_bench::{synthetic_day, write_quote_archive};
use leanbars_lib::{
    DayRangeDriver, LeanBarStore, LeanTickArchive, Resolution, SecurityType, Symbol,
};
use std::time::Duration;
use tempfile::TempDir;

const TICKS_PER_DAY: usize = 100_000;

fn pipeline_benchmark(c: &mut Criterion) {
    let symbol = Symbol::new("EURUSD", SecurityType::Forex, "oanda");
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let data = TempDir::new().unwrap();
    write_quote_archive(data.path(), &symbol, day, &synthetic_day(day, TICKS_PER_DAY)).unwrap();

    let driver = DayRangeDriver::new(
        LeanTickArchive::new(data.path()),
        LeanBarStore::new(data.path()),
        Resolution::all().to_vec(),
    )
    .unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));
    group.throughput(Throughput::Elements(TICKS_PER_DAY as u64));
    group.bench_function("process_day", |b| {
        b.iter(|| {
            let report = driver.process_day(&symbol, day);
            assert!(!report.has_failure());
        });
    });
    group.finish();
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
