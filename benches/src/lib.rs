//! Fixtures shared by the leanbars benchmarks.

use chrono::{NaiveDate, NaiveTime};
use leanbars_lib::{MS_PER_DAY, Symbol, Tick};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Generates `count` ticks spread evenly over `day` around 1.1000.
///
/// Prices follow a deterministic zig-zag so every bar has distinct extremes.
#[must_use]
pub fn synthetic_day(day: NaiveDate, count: usize) -> Vec<Tick> {
    let step = MS_PER_DAY / count.max(1) as i64;
    (0..count as i64)
        .filter_map(|i| {
            let pips = 11_000 + (i % 37) - 18;
            let bid = Decimal::new(pips, 4);
            let ask = Decimal::new(pips + 2, 4);
            Tick::at_offset(day, i * step, bid, ask)
        })
        .collect()
}

/// Writes ticks as a LEAN forex quote archive under `data_folder`.
///
/// # Errors
///
/// Returns an error if the archive cannot be created.
pub fn write_quote_archive(
    data_folder: &Path,
    symbol: &Symbol,
    day: NaiveDate,
    ticks: &[Tick],
) -> zip::result::ZipResult<()> {
    let path = leanbars_lib::LeanTickArchive::new(data_folder).archive_path(symbol, day);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut zip = zip::ZipWriter::new(std::fs::File::create(&path)?);
    let entry = format!(
        "{}_{}_tick_quote.csv",
        day.format("%Y%m%d"),
        symbol.path_ticker()
    );
    zip.start_file(entry, SimpleFileOptions::default())?;
    for tick in ticks {
        let offset = (tick.timestamp - day.and_time(NaiveTime::MIN))
            .num_milliseconds();
        writeln!(zip, "{offset},{},{}", tick.bid, tick.ask)?;
    }
    zip.finish()?;
    Ok(())
}
