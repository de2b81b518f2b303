//! Row filtering by a categorical marker column.

use crate::cell::CellValue;
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Keeps rows whose marker cell matches one of the accepted labels.
///
/// The marker column is addressed by position, not by name. Matching trims
/// the stringified cell and compares case-insensitively; `Null` never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerFilter {
    pub column: usize,
    pub accepted: Vec<String>,
}

impl Default for MarkerFilter {
    fn default() -> Self {
        MarkerFilter {
            column: 1,
            accepted: vec!["firm".to_string(), "forecast".to_string()],
        }
    }
}

impl MarkerFilter {
    /// Check a single marker cell.
    #[must_use]
    pub fn matches(&self, value: &CellValue) -> bool {
        if value.is_null() {
            return false;
        }
        let normalized = value.to_string().trim().to_lowercase();
        self.accepted
            .iter()
            .any(|label| label.trim().to_lowercase() == normalized)
    }

    /// Filter the table. Tables without a marker column come back unchanged.
    #[must_use]
    pub fn apply(&self, table: Table) -> Table {
        if table.col_count() <= self.column {
            tracing::debug!(
                columns = table.col_count(),
                "no marker column, skipping row filter"
            );
            return table;
        }

        let keep: Vec<bool> = table.columns()[self.column]
            .values
            .iter()
            .map(|value| self.matches(value))
            .collect();
        let before = table.row_count();
        let filtered = table.filter_rows(|i| keep[i]);
        tracing::debug!(before, after = filtered.row_count(), "filtered marker rows");
        filtered
    }
}

/// Keep only firm and forecast rows, using the second column as the marker.
#[must_use]
pub fn filter_firm_forecast(table: Table) -> Table {
    MarkerFilter::default().apply(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_is_identity() {
        let table = Table::from_rows(vec!["Status"], vec![vec!["Dropped"], vec!["Firm"]]);
        let out = filter_firm_forecast(table.clone());
        assert_eq!(out, table);
    }

    #[test]
    fn test_empty_table_is_identity() {
        let table = Table::new();
        assert_eq!(filter_firm_forecast(table.clone()), table);
    }

    #[test]
    fn test_keeps_firm_and_forecast_case_insensitive() {
        let table = Table::from_rows(
            vec!["Part", "Status"],
            vec![
                vec!["A", "  Firm "],
                vec!["B", "Dropped"],
                vec!["C", "FORECAST"],
                vec!["D", "firmly"],
            ],
        );
        let out = filter_firm_forecast(table);
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.get(0, 0), Some(&CellValue::from("A")));
        assert_eq!(out.get(1, 0), Some(&CellValue::from("C")));
    }

    #[test]
    fn test_null_and_numbers_never_match() {
        let table = Table::from_rows(
            vec!["Part", "Status"],
            vec![
                vec![CellValue::from("A"), CellValue::Null],
                vec![CellValue::from("B"), CellValue::Number(1.0)],
            ],
        );
        let out = filter_firm_forecast(table);
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.col_count(), 2);
    }

    #[test]
    fn test_custom_accepted_labels() {
        let filter = MarkerFilter {
            column: 0,
            accepted: vec!["Keep".to_string()],
        };
        let table = Table::from_rows(vec!["Flag"], vec![vec!["keep"], vec!["drop"]]);
        assert_eq!(filter.apply(table).row_count(), 1);
    }
}
