//! Stable column sorting with direction toggling.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::Row;

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort state for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `column`.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Apply a header click: the same column toggles direction, a new
    /// column restarts ascending.
    pub fn clicked(&mut self, column: &str) {
        if self.column == column {
            self.direction = self.direction.toggled();
        } else {
            column.clone_into(&mut self.column);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Sort `rows` in place by the configured column.
///
/// The sort is stable: rows with equal column values keep their relative
/// order, in both directions. Comparison is case-insensitive and rows
/// without a value for the column always sort last.
pub fn sort_rows<R: Row>(rows: &mut [R], sort: &Sort) {
    match sort.direction {
        SortDirection::Ascending => rows.sort_by_cached_key(|row| {
            let value = sort_key(row, &sort.column);
            (value.is_none(), value.unwrap_or_default())
        }),
        SortDirection::Descending => rows.sort_by_cached_key(|row| {
            let value = sort_key(row, &sort.column);
            (value.is_none(), Reverse(value.unwrap_or_default()))
        }),
    }
}

fn sort_key<R: Row>(row: &R, column: &str) -> Option<String> {
    row.field(column).map(|value| value.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        id: usize,
        label: Option<&'static str>,
    }

    impl Row for Entry {
        fn field(&self, column: &str) -> Option<String> {
            match column {
                "label" => self.label.map(str::to_owned),
                _ => None,
            }
        }
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { id: 0, label: Some("pears") },
            Entry { id: 1, label: Some("Apples") },
            Entry { id: 2, label: Some("apples") },
            Entry { id: 3, label: None },
            Entry { id: 4, label: Some("quince") },
        ]
    }

    #[rstest]
    fn ascending_sort_is_stable_for_equal_keys() {
        let mut rows = entries();
        sort_rows(&mut rows, &Sort::ascending("label"));
        let ids: Vec<usize> = rows.iter().map(|row| row.id).collect();
        // "Apples" (1) stays ahead of "apples" (2); missing label last.
        assert_eq!(ids, vec![1, 2, 0, 4, 3]);
    }

    #[rstest]
    fn descending_keeps_missing_values_last() {
        let mut rows = entries();
        let sort = Sort {
            column: "label".to_owned(),
            direction: SortDirection::Descending,
        };
        sort_rows(&mut rows, &sort);
        let ids: Vec<usize> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![4, 0, 1, 2, 3]);
    }

    #[rstest]
    fn sorting_twice_with_same_direction_is_idempotent() {
        let mut once = entries();
        let sort = Sort::ascending("label");
        sort_rows(&mut once, &sort);
        let mut twice = once.clone();
        sort_rows(&mut twice, &sort);
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("label", SortDirection::Descending)]
    #[case("other", SortDirection::Ascending)]
    fn clicked_toggles_same_column_and_resets_new_one(
        #[case] column: &str,
        #[case] expected: SortDirection,
    ) {
        let mut sort = Sort::ascending("label");
        sort.clicked(column);
        assert_eq!(sort.column, column);
        assert_eq!(sort.direction, expected);
    }

    #[rstest]
    fn unknown_column_preserves_original_order() {
        let mut rows = entries();
        sort_rows(&mut rows, &Sort::ascending("missing"));
        let ids: Vec<usize> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
