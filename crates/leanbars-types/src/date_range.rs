//! Inclusive date ranges and day iteration.

use chrono::{NaiveDate, TimeDelta};

use crate::DateRangeError;

/// Date format used on the command line and in file names.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYYMMDD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either date is malformed or start > end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DateRangeError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Creates a date range for a single day.
    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns an iterator over every day in the range, ascending.
    #[must_use]
    pub const fn days(&self) -> DayIterator {
        DayIterator {
            cursor: Some(self.start),
            end: self.end,
        }
    }

    /// Returns the total number of days in the range.
    #[must_use]
    pub fn total_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parses a `YYYYMMDD` date.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date in that form.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateRangeError> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateRangeError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| DateRangeError::InvalidDate(s.to_string()))
}

/// Day cursor over a [`DateRange`]; terminal once it passes the end date.
#[derive(Debug, Clone)]
pub struct DayIterator {
    cursor: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DayIterator {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|day| *day <= self.end)?;
        self.cursor = current.checked_add_signed(TimeDelta::days(1));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .cursor
            .filter(|day| *day <= self.end)
            .map_or(0, |day| (self.end - day).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayIterator {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));
        assert_eq!(range.total_days(), 31);
    }

    #[test]
    fn test_date_range_invalid() {
        assert!(DateRange::new(date(2024, 1, 31), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_day_iterator_crosses_month_and_leap_day() {
        let range = DateRange::new(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        let days: Vec<_> = range.days().collect();

        assert_eq!(days, vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]);
        assert_eq!(range.days().len(), 3);
    }

    #[test]
    fn test_single_day() {
        let range = DateRange::single_day(date(2024, 1, 2));
        assert_eq!(range.days().count(), 1);
    }

    #[test]
    fn test_parse() {
        let range = DateRange::parse("20171120", "20191205").unwrap();
        assert_eq!(range.start, date(2017, 11, 20));
        assert_eq!(range.end, date(2019, 12, 5));

        assert!(matches!(
            DateRange::parse("2017/11/20", "20191205"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("20170230", "20191205"),
            Err(DateRangeError::InvalidDate(_))
        ));
        assert!(matches!(
            DateRange::parse("20191205", "20171120"),
            Err(DateRangeError::InvalidRange { .. })
        ));
    }
}
