//! The fixed cleaning pipeline: cell typing, row filter, header
//! normalization and week consolidation.

use crate::consolidate::consolidate_weeks;
use crate::dates::DateOrder;
use crate::error::Result;
use crate::filter::MarkerFilter;
use crate::format::SourceFormat;
use crate::headers::normalize_headers;
use crate::normalize::{normalize_cells, SerialDatePolicy};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Options consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Order merged week columns by code
    pub sort_week_cols: bool,
    /// Reading of ambiguous numeric date labels
    pub date_order: DateOrder,
    /// Serial date detection for containers without date typing
    pub serial_dates: SerialDatePolicy,
    /// Marker column and accepted labels for the row filter
    pub marker: MarkerFilter,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            sort_week_cols: true,
            date_order: DateOrder::DayFirst,
            serial_dates: SerialDatePolicy::default(),
            marker: MarkerFilter::default(),
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_sort_week_cols(mut self, sort: bool) -> Self {
        self.sort_week_cols = sort;
        self
    }

    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns_in: usize,
    pub columns_out: usize,
    pub week_columns_in: usize,
    pub week_columns_out: usize,
    /// Columns whose day serials were read as dates
    pub serial_date_columns: Vec<String>,
}

impl PipelineReport {
    /// One-line description for display
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} of {} rows kept, {} week columns merged into {}, {} columns out",
            self.rows_out, self.rows_in, self.week_columns_in, self.week_columns_out, self.columns_out
        )
    }
}

/// Runs the cleaning stages in order over one table.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    #[must_use]
    pub fn new(options: PipelineOptions) -> Self {
        Pipeline { options }
    }

    /// Clean a table read from a workbook of the given format.
    pub fn run(&self, table: Table, format: SourceFormat) -> Result<(Table, PipelineReport)> {
        let mut report = PipelineReport {
            rows_in: table.row_count(),
            columns_in: table.col_count(),
            ..PipelineReport::default()
        };

        let (table, converted) = normalize_cells(table, format, &self.options.serial_dates);
        report.serial_date_columns = converted;

        let table = self.options.marker.apply(table);

        let headers = normalize_headers(&table.labels(), self.options.date_order);
        report.week_columns_in = headers.week_count();
        let table = table.with_labels(headers.labels)?;

        let table = consolidate_weeks(table, &headers.week_mask, self.options.sort_week_cols)?;
        report.week_columns_out = table.col_count() - (headers.week_mask.len() - report.week_columns_in);
        report.rows_out = table.row_count();
        report.columns_out = table.col_count();

        tracing::info!(
            %format,
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            week_columns_in = report.week_columns_in,
            week_columns_out = report.week_columns_out,
            "pipeline finished"
        );
        Ok((table, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_report_counts() {
        let table = Table::from_rows(
            vec!["Part", "Status", "15/01/2025", "202503", "22/01/2025"],
            vec![
                vec![CellValue::from("A"), "Firm".into(), 1.into(), 2.into(), 3.into()],
                vec![CellValue::from("B"), "Dropped".into(), 1.into(), 2.into(), 3.into()],
            ],
        );
        let (out, report) = Pipeline::default().run(table, SourceFormat::Xlsx).unwrap();
        assert_eq!(out.labels(), vec!["Part", "Status", "202503", "202504"]);
        assert_eq!(
            report,
            PipelineReport {
                rows_in: 2,
                rows_out: 1,
                columns_in: 5,
                columns_out: 4,
                week_columns_in: 3,
                week_columns_out: 2,
                serial_date_columns: vec![],
            }
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{"sort_week_cols": false, "date_order": "month_first"}"#).unwrap();
        assert!(!options.sort_week_cols);
        assert_eq!(options.date_order, DateOrder::MonthFirst);
        assert_eq!(options.serial_dates, SerialDatePolicy::default());
        assert_eq!(options.marker, MarkerFilter::default());
    }
}
