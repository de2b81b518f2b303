//! Merging of week columns that share a canonical label.

use crate::cell::CellValue;
use crate::error::{Result, WeekError};
use crate::table::{Column, Table};
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Sum one row across a group of columns.
///
/// A row where no member coerces to a number stays missing; otherwise missing
/// members count as zero.
fn sum_min_count_one<'a, I>(values: I) -> CellValue
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut total: Option<f64> = None;
    for n in values.into_iter().filter_map(CellValue::coerce_number) {
        *total.get_or_insert(0.0) += n;
    }
    total.map_or(CellValue::Null, CellValue::Number)
}

/// Ordering for week labels: six-digit codes by integer value first, then any
/// other label lexically.
fn compare_week_labels(a: &str, b: &str) -> Ordering {
    fn key(label: &str) -> Option<u32> {
        if crate::headers::is_week_code(label) {
            label.parse().ok()
        } else {
            None
        }
    }
    match (key(a), key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Merge week columns sharing a label by row-wise summation.
///
/// Non-week columns keep their relative order and come first, followed by one
/// column per distinct week label. With `sort_week_cols` the week block is
/// ordered by code; otherwise each merged column sits where the last column of
/// its group stood. A table with no week columns is returned unchanged.
pub fn consolidate_weeks(table: Table, week_mask: &[bool], sort_week_cols: bool) -> Result<Table> {
    if week_mask.len() != table.col_count() {
        return Err(WeekError::MaskLength {
            columns: table.col_count(),
            got: week_mask.len(),
        });
    }
    if !week_mask.iter().any(|w| *w) {
        tracing::debug!("no week columns, skipping consolidation");
        return Ok(table);
    }

    let row_count = table.row_count();
    let mut non_week: Vec<Column> = Vec::new();
    let mut groups: IndexMap<String, Vec<Column>> = IndexMap::new();
    // Position of the most recent member of each group, in input order.
    let mut last_seen: IndexMap<String, usize> = IndexMap::new();

    for (index, (column, is_week)) in table.into_columns().into_iter().zip(week_mask).enumerate() {
        if *is_week {
            last_seen.insert(column.label.clone(), index);
            groups.entry(column.label.clone()).or_default().push(column);
        } else {
            non_week.push(column);
        }
    }

    let week_in: usize = groups.values().map(Vec::len).sum();
    let mut merged: Vec<(usize, Column)> = groups
        .into_iter()
        .map(|(label, members)| {
            let values = (0..row_count)
                .map(|row| sum_min_count_one(members.iter().map(|c| &c.values[row])))
                .collect();
            let position = last_seen.get(&label).copied().unwrap_or(0);
            (position, Column::new(label, values))
        })
        .collect();

    if sort_week_cols {
        merged.sort_by(|(_, a), (_, b)| compare_week_labels(&a.label, &b.label));
    } else {
        merged.sort_by_key(|(position, _)| *position);
    }

    tracing::debug!(
        week_in,
        week_out = merged.len(),
        sorted = sort_week_cols,
        "consolidated week columns"
    );

    non_week.extend(merged.into_iter().map(|(_, column)| column));
    Table::from_columns_with_rows(non_week, row_count)
}
