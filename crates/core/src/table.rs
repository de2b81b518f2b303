use crate::cell::CellValue;
use crate::error::{Result, WeekError};

/// A labeled column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a new column
    #[must_use]
    pub fn new<S: Into<String>>(label: S, values: Vec<CellValue>) -> Self {
        Column {
            label: label.into(),
            values,
        }
    }
}

/// A table stored column-major as an ordered list of `(label, values)` pairs.
///
/// Labels are not required to be unique. The row count is kept separately so a
/// table without columns still knows how many rows it has.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, all of which must have the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, |c| c.values.len());
        Self::from_columns_with_rows(columns, row_count)
    }

    /// Build a table from columns with an explicit row count.
    pub fn from_columns_with_rows(columns: Vec<Column>, row_count: usize) -> Result<Self> {
        for (index, column) in columns.iter().enumerate() {
            if column.values.len() != row_count {
                return Err(WeekError::LengthMismatch {
                    column: index,
                    expected: row_count,
                    actual: column.values.len(),
                });
            }
        }
        Ok(Table { columns, row_count })
    }

    /// Build a table from labels and row-major data.
    ///
    /// Short rows are padded with `Null`, long rows are truncated to the label count.
    #[must_use]
    pub fn from_rows<S, T>(labels: Vec<S>, rows: Vec<Vec<T>>) -> Self
    where
        S: Into<String>,
        T: Into<CellValue>,
    {
        let row_count = rows.len();
        let mut columns: Vec<Column> = labels
            .into_iter()
            .map(|label| Column::new(label, Vec::with_capacity(row_count)))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                column.values.push(cells.next().map_or(CellValue::Null, Into::into));
            }
        }

        Table { columns, row_count }
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Column labels in order
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Consume the table, returning its columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Get a cell by row and column index
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col).and_then(|c| c.values.get(row))
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    /// Keep only the rows whose index satisfies the predicate, preserving order.
    #[must_use]
    pub fn filter_rows<F>(self, mut predicate: F) -> Table
    where
        F: FnMut(usize) -> bool,
    {
        let keep: Vec<bool> = (0..self.row_count).map(&mut predicate).collect();
        let row_count = keep.iter().filter(|k| **k).count();
        let columns = self
            .columns
            .into_iter()
            .map(|column| Column {
                label: column.label,
                values: column
                    .values
                    .into_iter()
                    .zip(&keep)
                    .filter_map(|(value, keep)| keep.then_some(value))
                    .collect(),
            })
            .collect();
        Table { columns, row_count }
    }

    /// Replace every column label. The label count must match the column count.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Table> {
        if labels.len() != self.columns.len() {
            return Err(WeekError::MaskLength {
                columns: self.columns.len(),
                got: labels.len(),
            });
        }
        for (column, label) in self.columns.iter_mut().zip(labels) {
            column.label = label;
        }
        Ok(self)
    }

    /// Apply a function to every column, in place.
    #[must_use]
    pub fn map_columns<F>(mut self, mut f: F) -> Table
    where
        F: FnMut(Column) -> Column,
    {
        self.columns = self.columns.into_iter().map(&mut f).collect();
        self
    }
}
