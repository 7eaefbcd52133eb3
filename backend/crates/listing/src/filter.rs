//! Case-insensitive substring filtering across configured columns.

use crate::Row;

/// Return `true` when any of `columns` contains `needle`.
///
/// Matching is case-insensitive. A blank needle matches every row; an
/// empty column list matches none (there is nothing to search).
pub fn matches<R: Row>(row: &R, needle: &str, columns: &[String]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    columns.iter().any(|column| {
        row.field(column)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}

/// Borrow the rows matching `needle`, preserving input order.
pub fn filter_rows<'a, R: Row>(rows: &'a [R], needle: &str, columns: &[String]) -> Vec<&'a R> {
    rows.iter()
        .filter(|row| matches(*row, needle, columns))
        .collect()
}
