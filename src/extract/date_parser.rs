// src/extract/date_parser.rs

use chrono::{Datelike, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SHORT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{1,2})$").expect("short date pattern"));

/// A `M/D/YY` date as published, year resolved to `2000 + YY`.
///
/// Month and day are only checked for shape, not calendar validity:
/// `13/40/23` is a `ShortDate`. Use [`ShortDate::to_naive`] when a real
/// calendar date is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ShortDate {
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Day of week, or `None` for out-of-range components.
    pub fn weekday(self) -> Option<Weekday> {
        self.to_naive().map(|d| d.weekday())
    }
}

impl fmt::Display for ShortDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parse `"3/15/23"` → `ShortDate { 2023, 3, 15 }`.
pub fn parse_short_date(s: &str) -> Option<ShortDate> {
    let caps = SHORT_DATE.captures(s.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let yy: i32 = caps[3].parse().ok()?;
    Some(ShortDate {
        year: 2000 + yy,
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_leading_zeros() {
        let d = parse_short_date("03/15/23").unwrap();
        assert_eq!(d, ShortDate { year: 2023, month: 3, day: 15 });
        assert_eq!(parse_short_date("3/5/9").unwrap().to_string(), "2009-03-05");
        assert_eq!(d.to_naive(), NaiveDate::from_ymd_opt(2023, 3, 15));
    }

    #[test]
    fn rejects_wrong_shape() {
        for bad in ["", "Date", "2023-03-15", "03/15/2023", "3/15", "a/b/c", "1/2/3/4", "03 /15/23"] {
            assert!(parse_short_date(bad).is_none(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn out_of_range_components_still_parse() {
        let d = parse_short_date("13/40/23").unwrap();
        assert_eq!((d.year, d.month, d.day), (2023, 13, 40));
        assert_eq!(d.to_string(), "2023-13-40");
        assert!(d.to_naive().is_none());
        assert!(d.weekday().is_none());
    }

    #[test]
    fn weekday_of_real_date() {
        // 2023-03-19 was a Sunday
        assert_eq!(parse_short_date("3/19/23").unwrap().weekday(), Some(Weekday::Sun));
    }
}
