//! Aggregation throughput at each resolution.
//!
//! Run with: `cargo bench --package leanbars-bench --bench aggregate_benchmark`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use leanbars_bench::synthetic_day;
use leanbars_lib::{Resolution, SecurityType, Symbol, aggregate_day};
use std::hint::black_box;

fn aggregate_benchmark(c: &mut Criterion) {
    let symbol = Symbol::new("EURUSD", SecurityType::Forex, "oanda");
    let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let mut group = c.benchmark_group("aggregate_day");
    for count in [10_000usize, 100_000, 1_000_000] {
        let ticks = synthetic_day(day, count);
        group.throughput(Throughput::Elements(count as u64));

        for &resolution in Resolution::all() {
            group.bench_with_input(
                BenchmarkId::new(resolution.as_str(), count),
                &ticks,
                |b, ticks| {
                    b.iter(|| {
                        aggregate_day(&symbol, day, resolution.duration(), black_box(ticks))
                            .unwrap()
                    });
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, aggregate_benchmark);
criterion_main!(benches);
