use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Milliseconds in one day, used for serial <-> datetime conversion.
const MS_PER_DAY: f64 = 86_400_000.0;

/// Day zero of the spreadsheet serial date system (1899-12-30).
///
/// Serial 1 is nominally 1900-01-01, but day zero is shifted back by one day to
/// absorb the historical 1900 leap-year bug.
#[must_use]
pub fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// A single cell in a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Date(NaiveDateTime),
    Text(String),
}

impl CellValue {
    /// Check if the value is missing
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Strict numeric coercion.
    ///
    /// Numbers pass through, text is parsed after trimming, and everything else
    /// (missing values, dates, unparseable text) yields `None`.
    #[must_use]
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_number(s),
            CellValue::Null | CellValue::Date(_) => None,
        }
    }

    /// Failure-tolerant numeric coercion.
    ///
    /// Text that parses as a number becomes `Number`; any other value is
    /// returned unchanged.
    #[must_use]
    pub fn to_numeric_lenient(self) -> CellValue {
        match self {
            CellValue::Text(s) => match parse_number(&s) {
                Some(n) => CellValue::Number(n),
                None => CellValue::Text(s),
            },
            other => other,
        }
    }

    /// Build a date from a spreadsheet day serial.
    ///
    /// The fractional part becomes the time of day. Returns `None` for
    /// non-finite serials or ones outside chrono's representable range.
    #[must_use]
    pub fn from_excel_serial(serial: f64) -> Option<CellValue> {
        serial_to_datetime(serial).map(CellValue::Date)
    }
}

/// Convert a spreadsheet day serial to a datetime (1899-12-30 epoch).
#[must_use]
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    let offset = Duration::try_milliseconds(millis as i64)?;
    excel_epoch().checked_add_signed(offset)
}

/// Convert a datetime back to a spreadsheet day serial.
#[must_use]
pub fn datetime_to_serial(value: NaiveDateTime) -> f64 {
    let delta = value - excel_epoch();
    delta.num_milliseconds() as f64 / MS_PER_DAY
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Number(f64::from(i))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(CellValue::Number(4.5).coerce_number(), Some(4.5));
        assert_eq!(CellValue::from(" 12 ").coerce_number(), Some(12.0));
        assert_eq!(CellValue::from("-3.25").coerce_number(), Some(-3.25));
        assert_eq!(CellValue::from("abc").coerce_number(), None);
        assert_eq!(CellValue::from("").coerce_number(), None);
        assert_eq!(CellValue::from("NaN").coerce_number(), None);
        assert_eq!(CellValue::from("inf").coerce_number(), None);
        assert_eq!(CellValue::Null.coerce_number(), None);
        assert_eq!(CellValue::Date(ymd(2025, 1, 1)).coerce_number(), None);
    }

    #[test]
    fn test_lenient_keeps_unparseable_text() {
        assert_eq!(CellValue::from("10").to_numeric_lenient(), CellValue::Number(10.0));
        assert_eq!(
            CellValue::from("abc").to_numeric_lenient(),
            CellValue::Text("abc".to_string())
        );
        assert_eq!(CellValue::Null.to_numeric_lenient(), CellValue::Null);
    }

    #[test]
    fn test_excel_serial_epoch() {
        assert_eq!(serial_to_datetime(0.0), Some(ymd(1899, 12, 30)));
        assert_eq!(serial_to_datetime(1.0), Some(ymd(1899, 12, 31)));
        assert_eq!(serial_to_datetime(45000.0), Some(ymd(2023, 3, 15)));
        assert_eq!(serial_to_datetime(f64::NAN), None);
    }

    #[test]
    fn test_excel_serial_fraction_is_time_of_day() {
        let dt = serial_to_datetime(45000.5).unwrap();
        assert_eq!(dt, ymd(2023, 3, 15) + Duration::hours(12));
        assert!((datetime_to_serial(dt) - 45000.5).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Number(202503.0).to_string(), "202503");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(
            CellValue::Date(ymd(2025, 1, 15)).to_string(),
            "2025-01-15 00:00:00"
        );
        assert_eq!(CellValue::from(" Firm ").to_string(), " Firm ");
    }
}
