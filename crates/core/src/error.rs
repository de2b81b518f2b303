//! Error types for weekfold.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, WeekError>;

/// Errors that can occur while building or transforming tables.
///
/// Per-cell coercion failures are never reported here; they fall back to
/// "missing" or "unchanged" where they happen.
#[derive(Debug, Error)]
pub enum WeekError {
    /// The source file type is not one of the supported workbook containers.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A column does not have one value per row.
    #[error("Data length mismatch in column {column}: expected {expected}, got {actual}")]
    LengthMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    /// A relabel or week mask does not cover every column.
    #[error("Column count mismatch: table has {columns} columns, got {got} entries")]
    MaskLength { columns: usize, got: usize },
}
