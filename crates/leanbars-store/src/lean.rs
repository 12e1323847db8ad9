//! LEAN data folder bar writer.

use chrono::NaiveDate;
use leanbars_aggregate::Bar;
use leanbars_types::{DATE_FORMAT, Resolution, Symbol};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

use crate::csv::{CsvFormatter, parse_low_resolution_time};
use crate::store::{BarStore, StoreError, ensure_same_day};

/// Location of a series: the zip file and the CSV entry inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesLocation {
    /// Zip file path.
    pub path: PathBuf,
    /// Name of the CSV entry inside the zip.
    pub entry: String,
}

/// Returns where a symbol's bars for `day` at `resolution` are stored.
///
/// Layout:
/// - second/minute: `{data}/{type}/{market}/{res}/{ticker}/{yyyyMMdd}_trade.zip`
///   holding `{yyyyMMdd}_{ticker}_{res}_trade.csv`
/// - hour/daily: `{data}/{type}/{market}/{res}/{ticker}.zip` holding `{ticker}.csv`
#[must_use]
pub fn series_location(
    data_folder: &Path,
    symbol: &Symbol,
    resolution: Resolution,
    day: NaiveDate,
) -> SeriesLocation {
    let ticker = symbol.path_ticker();
    let dir = data_folder
        .join(symbol.security_type().as_str())
        .join(symbol.market())
        .join(resolution.as_str());

    if resolution.is_high_resolution() {
        let date = day.format(DATE_FORMAT);
        SeriesLocation {
            path: dir.join(&ticker).join(format!("{date}_trade.zip")),
            entry: format!("{date}_{ticker}_{resolution}_trade.csv"),
        }
    } else {
        SeriesLocation {
            path: dir.join(format!("{ticker}.zip")),
            entry: format!("{ticker}.csv"),
        }
    }
}

/// Writes bars into a LEAN-style data folder.
///
/// Second and minute days own their file and are rewritten whole. Hour and
/// daily days share one file per symbol; writing a day replaces that day's
/// rows and keeps the rest in time order. Writers to the same series are
/// serialized; each file is written next to its target and renamed into place.
#[derive(Debug)]
pub struct LeanBarStore {
    data_folder: PathBuf,
    locks: Mutex<HashMap<(Symbol, Resolution), Arc<Mutex<()>>>>,
}

impl LeanBarStore {
    /// Creates a store rooted at `data_folder`.
    #[must_use]
    pub fn new(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the data folder.
    #[must_use]
    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    /// Returns the series location for a symbol, resolution and day.
    #[must_use]
    pub fn location(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        day: NaiveDate,
    ) -> SeriesLocation {
        series_location(&self.data_folder, symbol, resolution, day)
    }

    fn series_lock(&self, symbol: &Symbol, resolution: Resolution) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry((symbol.clone(), resolution)).or_default())
    }

    fn write_day_file(
        &self,
        location: &SeriesLocation,
        formatter: &CsvFormatter,
        bars: &[Bar],
    ) -> Result<(), StoreError> {
        if bars.is_empty() {
            return remove_if_exists(&location.path);
        }
        let mut content = Vec::new();
        formatter
            .write_bars(bars, &mut content)
            .map_err(|source| io_error(&location.path, source))?;
        write_zip(location, &content)
    }

    fn merge_into_series(
        &self,
        location: &SeriesLocation,
        formatter: &CsvFormatter,
        day: NaiveDate,
        bars: &[Bar],
    ) -> Result<(), StoreError> {
        let mut rows = BTreeMap::new();
        if let Some(existing) = read_zip(&location.path)? {
            for row in existing.lines().filter(|r| !r.trim().is_empty()) {
                let time = parse_low_resolution_time(row).ok_or_else(|| StoreError::Parse {
                    path: location.path.clone(),
                    row: row.to_string(),
                })?;
                if time.date() != day {
                    rows.insert(time, row.to_string());
                }
            }
        }
        rows.extend(bars.iter().map(|bar| (bar.time, formatter.format_row(bar))));

        if rows.is_empty() {
            return remove_if_exists(&location.path);
        }
        let mut content = String::new();
        for row in rows.values() {
            content.push_str(row);
            content.push('\n');
        }
        write_zip(location, content.as_bytes())
    }
}

impl BarStore for LeanBarStore {
    fn write(
        &self,
        symbol: &Symbol,
        resolution: Resolution,
        day: NaiveDate,
        bars: &[Bar],
    ) -> Result<(), StoreError> {
        ensure_same_day(day, bars)?;

        let location = self.location(symbol, resolution, day);
        let formatter = CsvFormatter::new(resolution, symbol.security_type());

        let lock = self.series_lock(symbol, resolution);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if resolution.is_high_resolution() {
            self.write_day_file(&location, &formatter, bars)?;
        } else {
            self.merge_into_series(&location, &formatter, day, bars)?;
        }

        tracing::debug!(
            path = %location.path.display(),
            %resolution,
            %day,
            bars = bars.len(),
            "wrote bars"
        );
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn zip_error(path: &Path, source: zip::result::ZipError) -> StoreError {
    StoreError::Zip {
        path: path.to_path_buf(),
        source,
    }
}

/// Reads the first entry of an existing series zip, or `None` if absent.
fn read_zip(path: &Path) -> Result<Option<String>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(io_error(path, source)),
    };

    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| zip_error(path, e))?;
    if archive.is_empty() {
        return Ok(None);
    }
    let mut entry = archive.by_index(0).map_err(|e| zip_error(path, e))?;
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|source| io_error(path, source))?;
    Ok(Some(content))
}

/// Writes a single-entry zip to a temporary sibling, then renames it over the target.
fn write_zip(location: &SeriesLocation, content: &[u8]) -> Result<(), StoreError> {
    let path = &location.path;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let tmp = path.with_extension("zip.tmp");
    let file = File::create(&tmp).map_err(|source| io_error(&tmp, source))?;

    let mut writer = zip::ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    writer
        .start_file(location.entry.as_str(), options)
        .map_err(|e| zip_error(&tmp, e))?;
    writer
        .write_all(content)
        .map_err(|source| io_error(&tmp, source))?;
    let mut inner = writer.finish().map_err(|e| zip_error(&tmp, e))?;
    inner.flush().map_err(|source| io_error(&tmp, source))?;
    drop(inner);

    fs::rename(&tmp, path).map_err(|source| io_error(path, source))
}

fn remove_if_exists(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(io_error(path, source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leanbars_types::SecurityType;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn symbol() -> Symbol {
        Symbol::new("EURUSD", SecurityType::Forex, "oanda")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn bar(day: NaiveDate, hour: u32, minute: u32, pips: i64) -> Bar {
        let price = Decimal::new(pips, 4);
        Bar {
            symbol: symbol(),
            time: day.and_hms_opt(hour, minute, 0).unwrap(),
            open: price,
            high: price,
            low: price,
            close: price,
            tick_count: 1,
        }
    }

    fn read_rows(store: &LeanBarStore, resolution: Resolution, day: NaiveDate) -> Vec<String> {
        let location = store.location(&symbol(), resolution, day);
        read_zip(&location.path)
            .unwrap()
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_series_location() {
        let root = Path::new("/data");

        let minute = series_location(root, &symbol(), Resolution::Minute, day(2));
        assert_eq!(minute.path, Path::new("/data/forex/oanda/minute/eurusd/20240102_trade.zip"));
        assert_eq!(minute.entry, "20240102_eurusd_minute_trade.csv");

        let hour = series_location(root, &symbol(), Resolution::Hour, day(2));
        assert_eq!(hour.path, Path::new("/data/forex/oanda/hour/eurusd.zip"));
        assert_eq!(hour.entry, "eurusd.csv");
    }

    #[test]
    fn test_minute_day_file() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());
        let bars = vec![bar(day(2), 9, 30, 11000), bar(day(2), 9, 31, 10998)];

        store.write(&symbol(), Resolution::Minute, day(2), &bars).unwrap();

        assert_eq!(
            read_rows(&store, Resolution::Minute, day(2)),
            vec!["34200000,1.1,1.1,1.1,1.1,0", "34260000,1.0998,1.0998,1.0998,1.0998,0"]
        );
    }

    #[test]
    fn test_hour_merge_keeps_other_days_sorted() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());

        store
            .write(&symbol(), Resolution::Hour, day(3), &[bar(day(3), 0, 0, 3)])
            .unwrap();
        store
            .write(&symbol(), Resolution::Hour, day(2), &[bar(day(2), 5, 0, 2)])
            .unwrap();

        assert_eq!(
            read_rows(&store, Resolution::Hour, day(2)),
            vec![
                "20240102 05:00,0.0002,0.0002,0.0002,0.0002,0",
                "20240103 00:00,0.0003,0.0003,0.0003,0.0003,0",
            ]
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());
        let bars = vec![bar(day(2), 0, 0, 12500)];

        store.write(&symbol(), Resolution::Daily, day(2), &bars).unwrap();
        let once = read_rows(&store, Resolution::Daily, day(2));
        store.write(&symbol(), Resolution::Daily, day(2), &bars).unwrap();

        assert_eq!(read_rows(&store, Resolution::Daily, day(2)), once);
        assert_eq!(once, vec!["20240102 00:00,1.25,1.25,1.25,1.25,0"]);
    }

    #[test]
    fn test_rewrite_replaces_changed_day() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());

        store
            .write(
                &symbol(),
                Resolution::Hour,
                day(2),
                &[bar(day(2), 1, 0, 1), bar(day(2), 2, 0, 1)],
            )
            .unwrap();
        store
            .write(&symbol(), Resolution::Hour, day(2), &[bar(day(2), 3, 0, 9)])
            .unwrap();

        assert_eq!(
            read_rows(&store, Resolution::Hour, day(2)),
            vec!["20240102 03:00,0.0009,0.0009,0.0009,0.0009,0"]
        );
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());
        store
            .write(&symbol(), Resolution::Second, day(2), &[bar(day(2), 0, 0, 1)])
            .unwrap();

        let location = store.location(&symbol(), Resolution::Second, day(2));
        assert!(location.path.exists());
        assert!(!location.path.with_extension("zip.tmp").exists());
    }

    #[test]
    fn test_corrupt_existing_row() {
        let dir = TempDir::new().unwrap();
        let store = LeanBarStore::new(dir.path());
        let location = store.location(&symbol(), Resolution::Daily, day(2));
        write_zip(&location, b"not a row\n").unwrap();

        let result = store.write(&symbol(), Resolution::Daily, day(2), &[bar(day(2), 0, 0, 1)]);
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_concurrent_writers_to_one_series() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(LeanBarStore::new(dir.path()));

        let handles: Vec<_> = (1..=8)
            .map(|d| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let bars = [bar(day(d), 0, 0, i64::from(d))];
                    store
                        .write(&symbol(), Resolution::Daily, day(d), &bars)
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(read_rows(&store, Resolution::Daily, day(1)).len(), 8);
    }
}
