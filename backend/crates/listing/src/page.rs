//! Fixed-size pagination envelopes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected page parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page numbers start at 1")]
    ZeroNumber,
    #[error("page size must be at least 1")]
    ZeroSize,
}

/// One requested page: 1-based number, fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "PageRequestDto")]
pub struct PageRequest {
    number: usize,
    size: usize,
}

impl PageRequest {
    /// Validate and construct a page request.
    pub const fn new(number: usize, size: usize) -> Result<Self, PageError> {
        if number == 0 {
            return Err(PageError::ZeroNumber);
        }
        if size == 0 {
            return Err(PageError::ZeroSize);
        }
        Ok(Self { number, size })
    }

    pub const fn number(self) -> usize {
        self.number
    }

    pub const fn size(self) -> usize {
        self.size
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRequestDto {
    number: usize,
    size: usize,
}

impl TryFrom<PageRequestDto> for PageRequest {
    type Error = PageError;

    fn try_from(dto: PageRequestDto) -> Result<Self, Self::Error> {
        Self::new(dto.number, dto.size)
    }
}

/// A materialised page plus the counters the table footer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into the requested page.
///
/// Requests past the final page yield an empty item list with the same
/// counters; slicing is total and never panics.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(request.size());
    let start = (request.number() - 1).saturating_mul(request.size());
    let page_items = items
        .iter()
        .skip(start)
        .take(request.size())
        .cloned()
        .collect();

    Page {
        items: page_items,
        number: request.number(),
        size: request.size(),
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, vec![10, 11], 3)]
    #[case(2, 2, vec![12, 13], 3)]
    #[case(3, 2, vec![14], 3)]
    #[case(4, 2, vec![], 3)]
    #[case(1, 10, vec![10, 11, 12, 13, 14], 1)]
    fn pages_slice_without_panicking(
        #[case] number: usize,
        #[case] size: usize,
        #[case] expected: Vec<i32>,
        #[case] total_pages: usize,
    ) {
        let items = vec![10, 11, 12, 13, 14];
        let request = PageRequest::new(number, size).unwrap();
        let page = paginate(&items, request);
        assert_eq!(page.items, expected);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, total_pages);
    }

    #[rstest]
    fn empty_input_yields_zero_pages() {
        let items: Vec<i32> = Vec::new();
        let page = paginate(&items, PageRequest::new(1, 5).unwrap());
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[rstest]
    #[case(0, 5, PageError::ZeroNumber)]
    #[case(1, 0, PageError::ZeroSize)]
    fn rejects_degenerate_requests(
        #[case] number: usize,
        #[case] size: usize,
        #[case] expected: PageError,
    ) {
        assert_eq!(PageRequest::new(number, size).unwrap_err(), expected);
    }

    #[rstest]
    fn deserialises_camel_case_and_validates() {
        let request: PageRequest = serde_json::from_str(r#"{"number":2,"size":25}"#).unwrap();
        assert_eq!(request.number(), 2);
        assert_eq!(request.size(), 25);
        assert!(serde_json::from_str::<PageRequest>(r#"{"number":0,"size":25}"#).is_err());
    }
}
