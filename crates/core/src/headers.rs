//! Column label normalization to `YYYYWW` week codes.

use crate::dates::{parse_date_label, DateOrder};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Normalized labels plus a parallel flag per column telling whether it is a
/// week column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedHeaders {
    pub labels: Vec<String>,
    pub week_mask: Vec<bool>,
}

impl NormalizedHeaders {
    /// Number of columns flagged as week columns
    #[must_use]
    pub fn week_count(&self) -> usize {
        self.week_mask.iter().filter(|w| **w).count()
    }
}

fn week_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("valid regex"))
}

/// Check whether a label is already a six-digit `YYYYWW` code.
#[must_use]
pub fn is_week_code(label: &str) -> bool {
    week_code_regex().is_match(label)
}

/// ISO week-numbering year followed by the zero-padded ISO week.
///
/// The ISO year can differ from the calendar year near year boundaries:
/// 2024-12-30 is in week 1 of 2025.
#[must_use]
pub fn iso_week_code(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}{:02}", week.year(), week.week())
}

/// Normalize one label, returning the new label and whether it is a week column.
///
/// Six-digit codes are taken as-is and never re-read as dates. Dates whose ISO
/// year has no four-digit form are left alone.
#[must_use]
pub fn normalize_label(label: &str, order: DateOrder) -> (String, bool) {
    if is_week_code(label) {
        return (label.to_string(), true);
    }
    match parse_date_label(label, order) {
        Some(date) if (0..=9999).contains(&date.iso_week().year()) => (iso_week_code(date), true),
        _ => (label.to_string(), false),
    }
}

/// Normalize every column label.
///
/// The result has one entry per input label. Canonical labels may repeat;
/// merging them is the consolidator's job.
#[must_use]
pub fn normalize_headers<S: AsRef<str>>(labels: &[S], order: DateOrder) -> NormalizedHeaders {
    let (labels, week_mask): (Vec<String>, Vec<bool>) = labels
        .iter()
        .map(|label| normalize_label(label.as_ref(), order))
        .unzip();

    let headers = NormalizedHeaders { labels, week_mask };
    tracing::debug!(
        columns = headers.labels.len(),
        weeks = headers.week_count(),
        "normalized headers"
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit_codes_pass_through() {
        for label in ["202503", "000000", "999999", "311225"] {
            assert_eq!(normalize_label(label, DateOrder::DayFirst), (label.to_string(), true));
        }
    }

    #[test]
    fn test_dates_become_iso_week_codes() {
        assert_eq!(
            normalize_label("15/01/2025", DateOrder::DayFirst),
            ("202503".to_string(), true)
        );
        assert_eq!(
            normalize_label("2025-01-15 00:00:00", DateOrder::DayFirst),
            ("202503".to_string(), true)
        );
    }

    #[test]
    fn test_iso_year_differs_from_calendar_year() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(iso_week_code(d), "202501");
        let d = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(iso_week_code(d), "202053");
    }

    #[test]
    fn test_day_order_changes_classification() {
        // 3 April 2025 is week 14, 4 March 2025 is week 10
        assert_eq!(normalize_label("03/04/2025", DateOrder::DayFirst).0, "202514");
        assert_eq!(normalize_label("03/04/2025", DateOrder::MonthFirst).0, "202510");
    }

    #[test]
    fn test_other_labels_untouched() {
        let headers = normalize_headers(
            &["Part Number", "Status", "15/01/2025", "202503", "Unnamed: 4", "2025"],
            DateOrder::DayFirst,
        );
        assert_eq!(
            headers.labels,
            vec!["Part Number", "Status", "202503", "202503", "Unnamed: 4", "2025"]
        );
        assert_eq!(headers.week_mask, vec![false, false, true, true, false, false]);
        assert_eq!(headers.week_count(), 2);
    }

    #[test]
    fn test_year_zero_date_is_not_a_week_column() {
        // 0000-01-01 falls in ISO year -1
        assert_eq!(
            normalize_label("0000-01-01", DateOrder::DayFirst),
            ("0000-01-01".to_string(), false)
        );
        assert_eq!(
            normalize_label("0000-01-03", DateOrder::DayFirst),
            ("000001".to_string(), true)
        );
        let headers = normalize_headers(&["0000-01-01", "15/01/2025"], DateOrder::DayFirst);
        assert_eq!(headers.week_mask, vec![false, true]);
    }

    #[test]
    fn test_date_codes_are_six_digits_with_valid_week() {
        let labels = ["01/01/2020", "31/12/2024", "28/12/2026", "1 Jan 2027", "2030-06-15"];
        let headers = normalize_headers(&labels, DateOrder::DayFirst);
        for label in &headers.labels {
            assert!(is_week_code(label), "{label}");
            let week: u32 = label[4..].parse().unwrap();
            assert!((1..=53).contains(&week), "{label}");
        }
        assert!(headers.week_mask.iter().all(|w| *w));
    }
}
