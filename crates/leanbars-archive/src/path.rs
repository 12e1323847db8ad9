//! Tick archive path construction.

use chrono::NaiveDate;
use leanbars_types::{DATE_FORMAT, Symbol};
use std::path::{Path, PathBuf};

/// Folder name under which tick archives are stored.
pub const TICK_FOLDER: &str = "tick";

/// Returns the directory holding a symbol's daily tick archives.
///
/// Layout: `{data_folder}/{security_type}/{market}/tick/{ticker}`
#[must_use]
pub fn tick_dir(data_folder: &Path, symbol: &Symbol) -> PathBuf {
    data_folder
        .join(symbol.security_type().as_str())
        .join(symbol.market())
        .join(TICK_FOLDER)
        .join(symbol.path_ticker())
}

/// Returns the path of one day's quote tick archive.
///
/// Layout: `{tick_dir}/{yyyyMMdd}_quote.zip`
///
/// # Example
///
/// ```
/// use leanbars_archive::path::quote_archive_path;
/// use leanbars_types::{SecurityType, Symbol};
/// use chrono::NaiveDate;
/// use std::path::Path;
///
/// let symbol = Symbol::new("EURUSD", SecurityType::Forex, "oanda");
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let path = quote_archive_path(Path::new("/data"), &symbol, day);
/// assert_eq!(path, Path::new("/data/forex/oanda/tick/eurusd/20240115_quote.zip"));
/// ```
#[must_use]
pub fn quote_archive_path(data_folder: &Path, symbol: &Symbol, day: NaiveDate) -> PathBuf {
    tick_dir(data_folder, symbol).join(format!("{}_quote.zip", day.format(DATE_FORMAT)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leanbars_types::SecurityType;

    #[test]
    fn test_quote_archive_path_lowercases_components() {
        let symbol = Symbol::new("BTCUSD", SecurityType::Crypto, "Coinbase");
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let path = quote_archive_path(Path::new("data"), &symbol, day);
        assert_eq!(
            path,
            Path::new("data/crypto/coinbase/tick/btcusd/20241231_quote.zip")
        );
    }

    #[test]
    fn test_tick_dir() {
        let symbol = Symbol::new("spy", SecurityType::Equity, "usa");
        let dir = tick_dir(Path::new("/lean"), &symbol);
        assert_eq!(dir, Path::new("/lean/equity/usa/tick/spy"));
    }
}
