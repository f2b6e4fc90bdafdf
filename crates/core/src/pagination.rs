//! Page-number pagination arithmetic.
//!
//! The API pages list results with a 1-based page number (`pagina`) and an
//! optional caller-supplied page size (`page_size`). This module resolves the
//! raw query values into a concrete window over a result set of known size;
//! rendering links and envelopes is the API layer's job.

use crate::error::CoreError;

/// Query parameter carrying the 1-based page number.
pub const PAGE_QUERY_PARAM: &str = "pagina";

/// Query parameter carrying the caller's requested page size.
pub const PAGE_SIZE_QUERY_PARAM: &str = "page_size";

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 2;

/// Upper bound on a caller-requested page size.
pub const MAX_PAGE_SIZE: i64 = 4;

/// Keyword accepted in place of a number to select the final page.
const LAST_PAGE_KEYWORD: &str = "last";

/// Resolve the requested page size.
///
/// Missing, non-numeric and non-positive values fall back to
/// [`DEFAULT_PAGE_SIZE`]; anything above [`MAX_PAGE_SIZE`] is clamped.
pub fn resolve_page_size(raw: Option<&str>) -> i64 {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
        _ => DEFAULT_PAGE_SIZE,
    }
}

/// A resolved page over a result set of `count` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number.
    pub number: i64,
    /// Rows per page.
    pub size: i64,
    /// Total rows matching the query.
    pub count: i64,
}

impl PageWindow {
    /// Resolve the raw `pagina` value against a result set of `count` rows.
    ///
    /// An empty result set still has one (empty) page. Anything that is not a
    /// positive integer within range, or the `last` keyword, is
    /// [`CoreError::InvalidPage`].
    pub fn resolve(raw_page: Option<&str>, size: i64, count: i64) -> Result<Self, CoreError> {
        let size = size.max(1);
        let count = count.max(0);
        let num_pages = num_pages(count, size);

        let number = match raw_page.map(str::trim) {
            None | Some("") => 1,
            Some(LAST_PAGE_KEYWORD) => num_pages,
            Some(raw) => raw.parse::<i64>().map_err(|_| CoreError::InvalidPage)?,
        };

        if number < 1 || number > num_pages {
            return Err(CoreError::InvalidPage);
        }

        Ok(Self {
            number,
            size,
            count,
        })
    }

    /// Number of rows to skip before this page.
    pub fn offset(&self) -> i64 {
        (self.number - 1) * self.size
    }

    /// Total number of pages (at least one).
    pub fn num_pages(&self) -> i64 {
        num_pages(self.count, self.size)
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

fn num_pages(count: i64, size: i64) -> i64 {
    if count == 0 {
        1
    } else {
        (count + size - 1) / size
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn page_size_defaults_to_two() {
        assert_eq!(resolve_page_size(None), 2);
        assert_eq!(resolve_page_size(Some("abc")), 2);
        assert_eq!(resolve_page_size(Some("0")), 2);
        assert_eq!(resolve_page_size(Some("-3")), 2);
    }

    #[test]
    fn page_size_is_clamped_to_four() {
        assert_eq!(resolve_page_size(Some("3")), 3);
        assert_eq!(resolve_page_size(Some("4")), 4);
        assert_eq!(resolve_page_size(Some("50")), 4);
    }

    #[test]
    fn first_page_by_default() {
        let page = PageWindow::resolve(None, 2, 5).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.offset(), 0);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn second_page_offset() {
        let page = PageWindow::resolve(Some("2"), 2, 5).unwrap();
        assert_eq!(page.offset(), 2);
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn last_keyword_selects_final_page() {
        let page = PageWindow::resolve(Some("last"), 2, 5).unwrap();
        assert_eq!(page.number, 3);
        assert_eq!(page.offset(), 4);
        assert!(!page.has_next());
    }

    #[test]
    fn empty_result_has_one_page() {
        let page = PageWindow::resolve(Some("1"), 2, 0).unwrap();
        assert_eq!(page.num_pages(), 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn out_of_range_page_is_invalid() {
        assert_matches!(
            PageWindow::resolve(Some("4"), 2, 5),
            Err(CoreError::InvalidPage)
        );
        assert_matches!(
            PageWindow::resolve(Some("0"), 2, 5),
            Err(CoreError::InvalidPage)
        );
        assert_matches!(
            PageWindow::resolve(Some("2"), 2, 0),
            Err(CoreError::InvalidPage)
        );
    }

    #[test]
    fn non_numeric_page_is_invalid() {
        assert_matches!(
            PageWindow::resolve(Some("two"), 2, 5),
            Err(CoreError::InvalidPage)
        );
    }
}
