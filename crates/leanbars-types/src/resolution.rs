//! Bar resolution definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ResolutionParseError;

/// Duration of an aggregation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// 1-second bars.
    Second,
    /// 1-minute bars.
    Minute,
    /// 1-hour bars.
    Hour,
    /// Daily bars.
    Daily,
}

impl Resolution {
    /// Returns the bucket duration.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        match self {
            Self::Second => TimeDelta::seconds(1),
            Self::Minute => TimeDelta::minutes(1),
            Self::Hour => TimeDelta::hours(1),
            Self::Daily => TimeDelta::days(1),
        }
    }

    /// Returns the lower-case name, which is also the storage folder name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Daily => "daily",
        }
    }

    /// Returns true if bars of this resolution are stored one file per day.
    ///
    /// Hour and daily bars live in a single multi-day file per symbol.
    #[must_use]
    pub const fn is_high_resolution(&self) -> bool {
        matches!(self, Self::Second | Self::Minute)
    }

    /// Returns all resolutions, finest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Second, Self::Minute, Self::Hour, Self::Daily]
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ResolutionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "second" | "s1" | "1s" => Ok(Self::Second),
            "minute" | "m1" | "1m" => Ok(Self::Minute),
            "hour" | "h1" | "1h" => Ok(Self::Hour),
            "daily" | "day" | "d1" | "1d" => Ok(Self::Daily),
            _ => Err(ResolutionParseError(s.to_string())),
        }
    }
}
