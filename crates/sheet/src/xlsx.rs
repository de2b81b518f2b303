use crate::error::{Result, SheetError};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use weekfold_core::{datetime_to_serial, CellValue, Table};

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// File name for a result produced on `date`, e.g. `20250115.xlsx`
#[must_use]
pub fn output_file_name(date: NaiveDate) -> String {
    format!("{}.xlsx", date.format("%Y%m%d"))
}

/// Save a table to an Excel file: labels in a bold first row, values below.
///
/// # Errors
///
/// Returns error if the table exceeds worksheet limits or the file cannot be written.
pub fn write_xlsx<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_to_worksheet(table, worksheet)?;

    workbook.save(path.as_ref())?;
    tracing::debug!(
        path = %path.as_ref().display(),
        rows = table.row_count(),
        columns = table.col_count(),
        "wrote xlsx"
    );
    Ok(())
}

/// Write table data to a worksheet
fn write_to_worksheet(table: &Table, worksheet: &mut Worksheet) -> Result<()> {
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    for (col_idx, column) in table.columns().iter().enumerate() {
        let col_num =
            u16::try_from(col_idx).map_err(|_| SheetError::IndexOverflow { row: 0, col: col_idx })?;
        worksheet.write_string_with_format(0, col_num, &column.label, &header_format)?;

        for (row_idx, cell) in column.values.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1).map_err(|_| SheetError::IndexOverflow {
                row: row_idx + 1,
                col: col_idx,
            })?;

            match cell {
                CellValue::Null => {} // Leave empty
                CellValue::Number(n) if !n.is_finite() => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                CellValue::Date(d) => {
                    worksheet.write_number_with_format(
                        row_num,
                        col_num,
                        datetime_to_serial(*d),
                        &date_format,
                    )?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(output_file_name(date), "20250105.xlsx");
    }
}
