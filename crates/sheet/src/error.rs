use thiserror::Error;
use weekfold_core::WeekError;

/// Errors that can occur while reading or writing workbooks
#[derive(Error, Debug)]
pub enum SheetError {
    #[error(transparent)]
    Core(#[from] WeekError),

    #[error("Cannot open workbook {path}: {message}")]
    Open { path: String, message: String },

    #[error("Cannot read sheet {sheet}: {message}")]
    Read { sheet: String, message: String },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Workbook has no sheets")]
    NoSheets,

    #[error("Header row {header_row} is out of range (sheet has {rows} rows)")]
    HeaderRowOutOfRange { header_row: usize, rows: usize },

    #[error("Index overflow writing row {row}, col {col}")]
    IndexOverflow { row: usize, col: usize },

    #[error("XLSX write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
