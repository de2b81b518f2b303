//! Per-column value typing applied before the rest of the pipeline.
//!
//! Every column is coerced to numbers where its text parses. For containers
//! that lack date typing, a numeric column whose values mostly look like
//! day serials is then read back as dates.

use crate::cell::CellValue;
use crate::format::SourceFormat;
use crate::table::{Column, Table};
use serde::{Deserialize, Serialize};

/// Heuristic deciding when a numeric column holds day serials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialDatePolicy {
    /// Smallest serial counted as a plausible date (inclusive)
    pub min_serial: f64,
    /// Largest serial counted as a plausible date (inclusive)
    pub max_serial: f64,
    /// Share of non-missing values that must fall in range; must be exceeded
    pub threshold: f64,
}

impl Default for SerialDatePolicy {
    fn default() -> Self {
        SerialDatePolicy {
            min_serial: 20_000.0,
            max_serial: 60_000.0,
            threshold: 0.8,
        }
    }
}

impl SerialDatePolicy {
    /// Share of non-missing values that fall inside the serial range.
    ///
    /// `None` when the column is empty or not entirely numeric.
    #[must_use]
    pub fn in_range_ratio(&self, values: &[CellValue]) -> Option<f64> {
        let mut total = 0usize;
        let mut in_range = 0usize;
        for value in values {
            match value {
                CellValue::Null => {}
                CellValue::Number(n) => {
                    total += 1;
                    if (self.min_serial..=self.max_serial).contains(n) {
                        in_range += 1;
                    }
                }
                CellValue::Text(_) | CellValue::Date(_) => return None,
            }
        }
        (total > 0).then(|| in_range as f64 / total as f64)
    }

    /// Whether a coerced column should be read as dates.
    #[must_use]
    pub fn looks_like_serial_dates(&self, values: &[CellValue]) -> bool {
        self.in_range_ratio(values)
            .is_some_and(|ratio| ratio > self.threshold)
    }
}

/// Coerce every cell of a column, leaving unparseable cells as they were.
#[must_use]
pub fn coerce_column_numeric(column: Column) -> Column {
    Column {
        label: column.label,
        values: column
            .values
            .into_iter()
            .map(CellValue::to_numeric_lenient)
            .collect(),
    }
}

/// Read every number in a column as a day serial.
///
/// Serials that cannot be represented as a date become missing.
#[must_use]
pub fn serials_to_dates(column: Column) -> Column {
    Column {
        label: column.label,
        values: column
            .values
            .into_iter()
            .map(|value| match value {
                CellValue::Number(n) => CellValue::from_excel_serial(n).unwrap_or(CellValue::Null),
                other => other,
            })
            .collect(),
    }
}

/// Apply format-specific cell typing to a freshly read table.
///
/// Returns the new table and the labels of columns that were turned into dates.
#[must_use]
pub fn normalize_cells(
    table: Table,
    format: SourceFormat,
    policy: &SerialDatePolicy,
) -> (Table, Vec<String>) {
    let mut converted = Vec::new();
    let table = table.map_columns(|column| {
        let column = coerce_column_numeric(column);
        if format.lacks_date_typing() && policy.looks_like_serial_dates(&column.values) {
            converted.push(column.label.clone());
            serials_to_dates(column)
        } else {
            column
        }
    });

    if !converted.is_empty() {
        tracing::debug!(%format, columns = ?converted, "read serial columns as dates");
    }
    (table, converted)
}
