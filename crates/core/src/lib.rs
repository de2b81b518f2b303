//! # weekfold-core
//!
//! Cleans planning tables whose columns are labeled by calendar dates or by
//! `YYYYWW` week codes, producing one column per ISO week.
//!
//! The pipeline runs four stages in a fixed order:
//!
//! 1. cell typing ([`normalize_cells`]): numeric text becomes numbers, and for
//!    `.xlsb` sources columns of day serials become dates
//! 2. row filtering ([`MarkerFilter`]): keeps `firm`/`forecast` rows by the
//!    second column
//! 3. header normalization ([`normalize_headers`]): date labels become ISO
//!    `YYYYWW` codes
//! 4. week consolidation ([`consolidate_weeks`]): columns sharing a code are
//!    summed into one
//!
//! # Example
//!
//! ```
//! use weekfold_core::{CellValue, Pipeline, SourceFormat, Table};
//!
//! let table = Table::from_rows(
//!     vec!["Part", "Status", "15/01/2025", "202503"],
//!     vec![
//!         vec![CellValue::from("P-1"), "Firm".into(), 5.into(), 3.into()],
//!         vec![CellValue::from("P-2"), "Dropped".into(), 1.into(), 1.into()],
//!     ],
//! );
//!
//! let (clean, _report) = Pipeline::default().run(table, SourceFormat::Xlsx).unwrap();
//! assert_eq!(clean.labels(), vec!["Part", "Status", "202503"]);
//! assert_eq!(clean.get(0, 2), Some(&CellValue::Number(8.0)));
//! ```

mod cell;
mod consolidate;
mod dates;
mod error;
mod filter;
mod format;
mod headers;
mod normalize;
mod pipeline;
mod table;

pub use cell::{datetime_to_serial, excel_epoch, serial_to_datetime, CellValue};
pub use consolidate::consolidate_weeks;
pub use dates::{parse_date_label, DateOrder};
pub use error::{Result, WeekError};
pub use filter::{filter_firm_forecast, MarkerFilter};
pub use format::SourceFormat;
pub use headers::{is_week_code, iso_week_code, normalize_headers, normalize_label, NormalizedHeaders};
pub use normalize::{coerce_column_numeric, normalize_cells, serials_to_dates, SerialDatePolicy};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport};
pub use table::{Column, Table};
