use crate::error::{Result, SheetError};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use weekfold_core::{CellValue, SourceFormat, Table};

/// Rows shown by a raw preview unless asked otherwise
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Which sheet to read and where its header row is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Sheet name; the first sheet when unset
    pub sheet: Option<String>,
    /// Zero-based row holding the column labels
    pub header_row: usize,
}

impl ReadOptions {
    #[must_use]
    pub fn with_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        // Days since 1899-12-30; the 1904 date system is not detected
        Data::DateTime(dt) => CellValue::from_excel_serial(dt.as_f64()).unwrap_or(CellValue::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Turn a header cell into a column label.
fn header_label(index: usize, cell: &CellValue) -> String {
    match cell {
        CellValue::Null => format!("Unnamed: {index}"),
        other => other.to_string(),
    }
}

/// All rows of a range, anchored at A1 so row and column indices match what
/// a spreadsheet user sees.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };
    let width = first_col as usize + range.width();

    let mut rows = vec![vec![CellValue::Null; width]; first_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; first_col as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        rows.push(cells);
    }
    rows
}

/// Split a raw grid into labels from `header_row` and the non-empty rows below it.
pub fn table_from_grid(grid: Vec<Vec<CellValue>>, header_row: usize) -> Result<Table> {
    if grid.is_empty() {
        return Ok(Table::new());
    }
    if header_row >= grid.len() {
        return Err(SheetError::HeaderRowOutOfRange {
            header_row,
            rows: grid.len(),
        });
    }

    let mut rows = grid.into_iter().skip(header_row);
    let labels: Vec<String> = rows
        .next()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, cell)| header_label(i, cell))
        .collect();
    let data: Vec<Vec<CellValue>> = rows
        .filter(|row| !row.iter().all(CellValue::is_null))
        .collect();

    Ok(Table::from_rows(labels, data))
}

/// An open source workbook.
pub struct Workbook {
    format: SourceFormat,
    inner: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook, identifying its format from the extension first.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-format error for unknown extensions, or an open
    /// error if the file cannot be read as a workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        let inner = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), %format, "opened workbook");

        Ok(Workbook {
            format,
            inner,
        })
    }

    #[must_use]
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Sheet names in workbook order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn resolve_sheet(&self, sheet: Option<&str>) -> Result<String> {
        let names = self.sheet_names();
        match sheet {
            Some(name) if names.iter().any(|n| n == name) => Ok(name.to_string()),
            Some(name) => Err(SheetError::SheetNotFound {
                name: name.to_string(),
            }),
            None => names.into_iter().next().ok_or(SheetError::NoSheets),
        }
    }

    fn grid(&mut self, sheet: Option<&str>) -> Result<Vec<Vec<CellValue>>> {
        let name = self.resolve_sheet(sheet)?;
        let range = self
            .inner
            .worksheet_range(&name)
            .map_err(|e| SheetError::Read {
                sheet: name.clone(),
                message: e.to_string(),
            })?;
        Ok(anchored_rows(&range))
    }

    /// The first `rows` rows of a sheet with no header interpretation.
    pub fn preview(&mut self, sheet: Option<&str>, rows: usize) -> Result<Vec<Vec<CellValue>>> {
        let mut grid = self.grid(sheet)?;
        grid.truncate(rows);
        Ok(grid)
    }

    /// Read a sheet as a table whose labels come from `options.header_row`.
    ///
    /// Rows above the header are ignored and fully empty rows below it are
    /// dropped. Duplicate labels are kept as they are.
    pub fn read_table(&mut self, options: &ReadOptions) -> Result<Table> {
        let grid = self.grid(options.sheet.as_deref())?;
        let table = table_from_grid(grid, options.header_row)?;
        tracing::debug!(
            sheet = ?options.sheet,
            header_row = options.header_row,
            rows = table.row_count(),
            columns = table.col_count(),
            "read table"
        );
        Ok(table)
    }
}
