//! Calendar date recognition for column labels.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How to read an ambiguous numeric date such as `03/04/2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `03/04/2025` is 3 April 2025
    #[default]
    DayFirst,
    /// `03/04/2025` is 4 March 2025
    MonthFirst,
}

/// Formats with a month name; `%B` also accepts the abbreviation when parsing.
const NAMED_MONTH_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d-%B-%Y",
    "%d/%B/%Y",
    "%d %B, %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

fn numeric_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]{1,4})([/.-])([0-9]{1,2})([/.-])([0-9]{1,4})(?:[ T]([0-9]{1,2}):([0-9]{2})(?::([0-9]{2})(?:\.[0-9]+)?)?)?$",
        )
        .expect("valid regex")
    })
}

/// Parse a label as a full calendar date.
///
/// Bare numbers, times and partial dates are not dates. A four-digit leading
/// group always means year-month-day; otherwise `order` decides which of the
/// first two groups is the day, falling back to the other reading when the
/// preferred one is not a valid date.
#[must_use]
pub fn parse_date_label(label: &str, order: DateOrder) -> Option<NaiveDate> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_numeric_date(trimmed, order).or_else(|| parse_named_month(trimmed))
}

fn parse_numeric_date(s: &str, order: DateOrder) -> Option<NaiveDate> {
    let caps = numeric_date_regex().captures(s)?;
    if caps[2] != caps[4] {
        return None;
    }

    if let (Some(hour), Some(minute)) = (caps.get(6), caps.get(7)) {
        let second = caps.get(8).map_or("0", |m| m.as_str());
        NaiveTime::from_hms_opt(
            hour.as_str().parse().ok()?,
            minute.as_str().parse().ok()?,
            second.parse().ok()?,
        )?;
    }

    let first = &caps[1];
    let middle: u32 = caps[3].parse().ok()?;
    let last = &caps[5];

    if first.len() == 4 {
        if last.len() > 2 {
            return None;
        }
        return NaiveDate::from_ymd_opt(first.parse().ok()?, middle, last.parse().ok()?);
    }
    if first.len() > 2 {
        return None;
    }

    let year = expand_year(last)?;
    let first: u32 = first.parse().ok()?;
    let (day, month) = match order {
        DateOrder::DayFirst => (first, middle),
        DateOrder::MonthFirst => (middle, first),
    };
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

/// Two-digit years pivot at 69: `68` is 2068, `69` is 1969.
fn expand_year(s: &str) -> Option<i32> {
    let value: i32 = s.parse().ok()?;
    match s.len() {
        4 => Some(value),
        2 if value < 69 => Some(2000 + value),
        2 => Some(1900 + value),
        _ => None,
    }
}

fn parse_named_month(s: &str) -> Option<NaiveDate> {
    if !s.chars().any(char::is_alphabetic) {
        return None;
    }
    NAMED_MONTH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_day_first() {
        assert_eq!(parse_date_label("15/01/2025", DateOrder::DayFirst), ymd(2025, 1, 15));
        assert_eq!(parse_date_label("03/04/2025", DateOrder::DayFirst), ymd(2025, 4, 3));
        assert_eq!(parse_date_label("3.4.2025", DateOrder::DayFirst), ymd(2025, 4, 3));
        assert_eq!(parse_date_label("03-04-25", DateOrder::DayFirst), ymd(2025, 4, 3));
    }

    #[test]
    fn test_month_first() {
        assert_eq!(parse_date_label("03/04/2025", DateOrder::MonthFirst), ymd(2025, 3, 4));
    }

    #[test]
    fn test_falls_back_when_day_first_is_invalid() {
        assert_eq!(parse_date_label("01/13/2025", DateOrder::DayFirst), ymd(2025, 1, 13));
        assert_eq!(parse_date_label("13/01/2025", DateOrder::MonthFirst), ymd(2025, 1, 13));
    }

    #[test]
    fn test_year_first_and_timestamps() {
        assert_eq!(parse_date_label("2025-01-15", DateOrder::DayFirst), ymd(2025, 1, 15));
        assert_eq!(
            parse_date_label("2025-01-15 00:00:00", DateOrder::DayFirst),
            ymd(2025, 1, 15)
        );
        assert_eq!(
            parse_date_label("2025-01-15T08:30", DateOrder::DayFirst),
            ymd(2025, 1, 15)
        );
        assert_eq!(parse_date_label("2025-01-15 25:00:00", DateOrder::DayFirst), None);
    }

    #[test]
    fn test_named_months() {
        assert_eq!(parse_date_label("15 Jan 2025", DateOrder::DayFirst), ymd(2025, 1, 15));
        assert_eq!(parse_date_label("15-Jan-2025", DateOrder::DayFirst), ymd(2025, 1, 15));
        assert_eq!(parse_date_label("15 January 2025", DateOrder::DayFirst), ymd(2025, 1, 15));
        assert_eq!(parse_date_label("Jan 15, 2025", DateOrder::DayFirst), ymd(2025, 1, 15));
    }

    #[test]
    fn test_named_month_spellings_outside_the_formats() {
        assert_eq!(parse_date_label("15 Sep 2025", DateOrder::DayFirst), ymd(2025, 9, 15));
        for label in ["15 Sept 2025", "15th Jan 2025", "2025 Jan 15", "Jan-15-2025"] {
            assert_eq!(parse_date_label(label, DateOrder::DayFirst), None, "{label}");
        }
    }

    #[test]
    fn test_not_dates() {
        for label in ["Part Number", "", "2025", "45000", "12:30", "15/01", "Q1 2025", "1/2/3/4"] {
            assert_eq!(parse_date_label(label, DateOrder::DayFirst), None, "{label}");
        }
        assert_eq!(parse_date_label("15/01-2025", DateOrder::DayFirst), None);
        assert_eq!(parse_date_label("31/02/2025", DateOrder::DayFirst), None);
    }
}
