//! Sort, filter, and pagination primitives for table endpoints.
//!
//! The frontend renders admin-style tables (permissions, scopes, users,
//! task templates) from plain JSON rows. This crate owns the list shaping
//! those tables share: a stable column sort whose direction toggles when
//! the same column is sorted again, a case-insensitive substring filter
//! across configured keys, and fixed-size page envelopes. Everything here
//! is deterministic and holds no state between calls.

mod filter;
mod page;
mod sort;

pub use filter::{filter_rows, matches};
pub use page::{Page, PageError, PageRequest};
pub use sort::{Sort, SortDirection, sort_rows};

/// A table row that can expose column values by key.
///
/// Implementations return `None` for unknown columns; missing values sort
/// after present ones and never match a filter.
pub trait Row {
    /// Display value for `column`, if the row has one.
    fn field(&self, column: &str) -> Option<String>;
}

/// Declarative list query: optional filter, optional sort, one page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Substring needle; `None` or blank keeps every row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Columns the filter needle is matched against.
    #[serde(default)]
    pub filter_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    pub page: PageRequest,
}

/// Shape `rows` through filter, sort, and pagination in one pass.
pub fn list<R>(rows: &[R], query: &ListQuery) -> Page<R>
where
    R: Row + Clone,
{
    let mut kept: Vec<R> = match &query.filter {
        Some(needle) => filter_rows(rows, needle, &query.filter_keys)
            .into_iter()
            .cloned()
            .collect(),
        None => rows.to_vec(),
    };
    if let Some(sort) = &query.sort {
        sort_rows(&mut kept, sort);
    }
    page::paginate(&kept, query.page)
}
