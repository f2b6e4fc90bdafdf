//! Page envelope and `next`/`previous` link rendering.

use axum::http::Uri;
use petkare_core::pagination::{PageWindow, PAGE_QUERY_PARAM};
use serde::Serialize;

/// Standard page-number envelope: `{count, next, previous, results}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Paginated<T> {
    /// Wrap one page of results, deriving links from the request URI.
    pub fn new(page: PageWindow, results: Vec<T>, base_url: &str, uri: &Uri) -> Self {
        let next = page
            .has_next()
            .then(|| page_link(base_url, uri, Some(page.number + 1)));

        // The link back to page one carries no page parameter at all.
        let previous = page.has_previous().then(|| {
            let target = page.number - 1;
            page_link(base_url, uri, (target > 1).then_some(target))
        });

        Self {
            count: page.count,
            next,
            previous,
            results,
        }
    }
}

/// Rebuild the request URL with the page parameter set to `page`, or removed
/// when `page` is `None`. Other query parameters are kept verbatim and in
/// order.
pub fn page_link(base_url: &str, uri: &Uri, page: Option<i64>) -> String {
    let mut pairs: Vec<String> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(PAGE_QUERY_PARAM))
        .map(str::to_string)
        .collect();

    if let Some(page) = page {
        pairs.push(format!("{PAGE_QUERY_PARAM}={page}"));
    }

    let path = uri.path();
    if pairs.is_empty() {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}{path}?{}", pairs.join("&"))
    }
}
