//! Instrument identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::SecurityTypeParseError;

/// Security type of an instrument.
///
/// Selects the top-level folder of the data layout and how prices are
/// encoded on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    /// Custom or base data.
    Base,
    /// Equities.
    Equity,
    /// Equity options.
    Option,
    /// Commodities.
    Commodity,
    /// Foreign exchange currency pairs.
    Forex,
    /// Futures.
    Future,
    /// Contracts for difference.
    Cfd,
    /// Cryptocurrencies.
    Crypto,
}

impl SecurityType {
    /// Returns the lower-case folder name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Equity => "equity",
            Self::Option => "option",
            Self::Commodity => "commodity",
            Self::Forex => "forex",
            Self::Future => "future",
            Self::Cfd => "cfd",
            Self::Crypto => "crypto",
        }
    }

    /// Returns the factor prices are multiplied by when stored on disk.
    ///
    /// Equity and option files store prices as integer deci-cents.
    #[must_use]
    pub fn price_scale(&self) -> Decimal {
        match self {
            Self::Equity | Self::Option => Decimal::from(10_000),
            _ => Decimal::ONE,
        }
    }

    /// Returns all security types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Base,
            Self::Equity,
            Self::Option,
            Self::Commodity,
            Self::Forex,
            Self::Future,
            Self::Cfd,
            Self::Crypto,
        ]
    }
}

impl std::fmt::Display for SecurityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = SecurityTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SecurityTypeParseError(s.to_string()))
    }
}

/// Identity of a tradable instrument within a market.
///
/// Cloning is cheap; bars carry their symbol by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    ticker: Arc<str>,
    security_type: SecurityType,
    market: Arc<str>,
}

impl Symbol {
    /// Creates a symbol. The ticker is upper-cased and the market lower-cased.
    #[must_use]
    pub fn new(ticker: &str, security_type: SecurityType, market: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase().into(),
            security_type,
            market: market.trim().to_lowercase().into(),
        }
    }

    /// Returns the upper-case ticker (e.g. "EURUSD").
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the ticker as used in file and folder names.
    #[must_use]
    pub fn path_ticker(&self) -> String {
        self.ticker.to_lowercase()
    }

    /// Returns the security type.
    #[must_use]
    pub const fn security_type(&self) -> SecurityType {
        self.security_type
    }

    /// Returns the lower-case market identifier (e.g. "oanda").
    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.ticker, self.security_type, self.market)
    }
}
