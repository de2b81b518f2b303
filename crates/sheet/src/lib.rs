//! Workbook I/O for weekfold
//!
//! Reads a sheet out of an `.xls`, `.xlsx`, `.xlsm` or `.xlsb` workbook into a
//! [`Table`], runs the cleaning pipeline, and writes the result to `.xlsx`.
//!
//! ```no_run
//! use weekfold_core::PipelineOptions;
//! use weekfold_sheet::{process_workbook, write_xlsx, ReadOptions};
//!
//! let read = ReadOptions::default().with_header_row(2);
//! let (table, report) = process_workbook("plan.xlsb", &read, &PipelineOptions::default()).unwrap();
//! write_xlsx(&table, "20250115.xlsx").unwrap();
//! println!("{}", report.summary());
//! ```

mod error;
mod workbook;
mod xlsx;

pub use error::{Result, SheetError};
pub use workbook::{table_from_grid, ReadOptions, Workbook, DEFAULT_PREVIEW_ROWS};
pub use xlsx::{output_file_name, write_xlsx};

use std::path::Path;
use weekfold_core::{Pipeline, PipelineOptions, PipelineReport, Table};

/// Open a workbook, read one sheet and clean it.
///
/// # Errors
///
/// Returns error if the format is unsupported, the workbook or sheet cannot be
/// read, or the header row is out of range.
pub fn process_workbook<P: AsRef<Path>>(
    path: P,
    read: &ReadOptions,
    options: &PipelineOptions,
) -> Result<(Table, PipelineReport)> {
    let mut workbook = Workbook::open(path)?;
    let table = workbook.read_table(read)?;
    let result = Pipeline::new(options.clone()).run(table, workbook.format())?;
    Ok(result)
}
