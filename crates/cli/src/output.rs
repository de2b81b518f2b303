//! Terminal rendering of tables and raw previews.

use anyhow::Result;
use prettytable::format::consts::FORMAT_BOX_CHARS;
use prettytable::{Cell, Row, Table as PrettyTable};
use std::io;
use weekfold_core::{CellValue, Table};

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

/// Print the labels and the first `limit` rows of a table.
pub fn print_table(table: &Table, limit: usize, format: OutputFormat) -> Result<()> {
    let header: Vec<String> = table.labels().into_iter().map(str::to_string).collect();
    let rows: Vec<Vec<&CellValue>> = table.rows().take(limit).collect();
    print_rows(Some(header.as_slice()), &rows, format)?;
    if table.row_count() > limit && matches!(format, OutputFormat::Table) {
        println!("... {} more rows", table.row_count() - limit);
    }
    Ok(())
}

/// Print raw rows with no header interpretation.
pub fn print_grid(grid: &[Vec<CellValue>], format: OutputFormat) -> Result<()> {
    let rows: Vec<Vec<&CellValue>> = grid.iter().map(|row| row.iter().collect()).collect();
    print_rows(None, &rows, format)
}

fn print_rows(header: Option<&[String]>, rows: &[Vec<&CellValue>], format: OutputFormat) -> Result<()> {
    if header.map_or(true, <[String]>::is_empty) && rows.is_empty() {
        println!("(empty table)");
        return Ok(());
    }

    match format {
        OutputFormat::Table => {
            let mut table = PrettyTable::new();
            table.set_format(*FORMAT_BOX_CHARS);
            if let Some(header) = header {
                table.set_titles(Row::new(
                    header.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
                ));
            }
            for row in rows {
                table.add_row(Row::new(row.iter().map(|value| pretty_cell(value)).collect()));
            }
            table.printstd();
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout());
            if let Some(header) = header {
                writer.write_record(header)?;
            }
            for row in rows {
                writer.write_record(row.iter().map(ToString::to_string))?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let json = rows_to_json(header, rows)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn pretty_cell(value: &CellValue) -> Cell {
    let cell = Cell::new(&value.to_string());
    match value {
        CellValue::Number(_) => cell.style_spec("r"),
        _ => cell,
    }
}

/// Rows as arrays of values, under `columns`/`rows` keys when there is a header.
///
/// Labels may repeat, so they are listed positionally instead of used as keys.
fn rows_to_json(header: Option<&[String]>, rows: &[Vec<&CellValue>]) -> Result<serde_json::Value> {
    let rows = serde_json::to_value(rows)?;
    Ok(match header {
        Some(header) => serde_json::json!({ "columns": header, "rows": rows }),
        None => rows,
    })
}
