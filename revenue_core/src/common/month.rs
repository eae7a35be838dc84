use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::forecast_error::{ErrCode, ForecastError};

/// Calendar month, the unit of every series in this crate.
///
/// Stored as year and month number; the canonical date is the first day of
/// the month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, ForecastError> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::new(
                format!("month number {} out of range 1..=12", month),
                ErrCode::ParaError,
            ));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`; the day part is dropped.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month, `None` only outside chrono's date range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Shift by `n` calendar months (negative goes back).
    pub fn add_months(&self, n: i32) -> Self {
        Self::from_ordinal(self.ordinal() + n as i64)
    }

    pub fn sub_months(&self, n: i32) -> Self {
        self.add_months(-n)
    }

    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: &Month) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Iterate `self..=end` one month at a time. Empty when `end < self`.
    pub fn range_inclusive(&self, end: Month) -> impl Iterator<Item = Month> {
        let start = self.ordinal();
        (start..=end.ordinal()).map(Month::from_ordinal)
    }

    /// Parse a month.
    ///
    /// Accepts "YYYY-MM", "YYYY-MM-DD", "YYYY-MM-DD HH:MM:SS" and "YYYYMMDD".
    pub fn parse(time_str: &str) -> Result<Self, ForecastError> {
        let s = time_str.trim();
        let date = if s.contains('-') {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.date())
                .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
                .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
        } else {
            NaiveDate::parse_from_str(s, "%Y%m%d")
        };

        date.map(Self::from_date).map_err(|e| {
            ForecastError::new(
                format!("cannot parse month from {:?}: {}", time_str, e),
                ErrCode::SrcDataFormatError,
            )
        })
    }

    pub fn to_month_str(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-01", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Month::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(y: i32, mo: u32) -> Month {
        Month::new(y, mo).unwrap()
    }

    #[test]
    fn test_add_months_crosses_years() {
        assert_eq!(m(2023, 11).add_months(3), m(2024, 2));
        assert_eq!(m(2024, 1).sub_months(1), m(2023, 12));
        assert_eq!(m(2024, 5).sub_months(12), m(2023, 5));
        assert_eq!(m(2024, 5).add_months(-29), m(2021, 12));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(m(2022, 1).months_until(&m(2024, 1)), 24);
        assert_eq!(m(2024, 3).months_until(&m(2024, 1)), -2);
    }

    #[test]
    fn test_range_inclusive() {
        let months: Vec<_> = m(2023, 11).range_inclusive(m(2024, 2)).collect();
        assert_eq!(months, vec![m(2023, 11), m(2023, 12), m(2024, 1), m(2024, 2)]);
        assert_eq!(m(2024, 2).range_inclusive(m(2023, 1)).count(), 0);
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(Month::parse("2024-03").unwrap(), m(2024, 3));
        assert_eq!(Month::parse("2024-03-01").unwrap(), m(2024, 3));
        assert_eq!(Month::parse("2024-03-17").unwrap(), m(2024, 3));
        assert_eq!(Month::parse("2024-03-01 00:00:00").unwrap(), m(2024, 3));
        assert_eq!(Month::parse("20240331").unwrap(), m(2024, 3));
        let err = Month::parse("March 2024").unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(Month::new(2024, 0).is_err());
        assert!(Month::new(2024, 13).is_err());
    }

    #[test]
    fn test_display_and_serde() {
        let month = m(2024, 7);
        assert_eq!(month.to_string(), "2024-07-01");
        assert_eq!(month.to_month_str(), "2024-07");
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 7, 1));
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-07-01\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
