//! Page count and previous/next navigation
//!
//! Navigation depends only on `(total, page_size, page)`. The number of
//! records actually returned for the page plays no part, so a short or empty
//! page never produces a link past the end of the data.

use crate::search::PagingInfo;
use serde::{Deserialize, Serialize};

/// Produces the URL for another page of the same request
pub trait PageLinkBuilder {
    /// Link to `page`, every other request parameter unchanged
    fn page_link(&self, page: u32) -> String;
}

impl<F> PageLinkBuilder for F
where
    F: Fn(u32) -> String,
{
    fn page_link(&self, page: u32) -> String {
        self(page)
    }
}

/// Navigation fields of a page envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageNavigation {
    pub prev: Option<String>,
    pub next: Option<String>,
    pub total: u64,
    pub pages: u64,
}

/// `ceil(total / page_size)`; zero when there is nothing to page through
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(page_size))
}

/// Compute page count and navigation links for `paging` over `total` records.
///
/// Pages past the end are accepted: they get a previous link (when not on
/// page zero) and no next link.
pub fn paginate<L>(paging: PagingInfo, total: u64, links: &L) -> PageNavigation
where
    L: PageLinkBuilder + ?Sized,
{
    let pages = total_pages(total, paging.page_size);
    let prev = paging.page.checked_sub(1).map(|p| links.page_link(p));
    let next = paging
        .page
        .checked_add(1)
        .filter(|&p| u64::from(p) < pages)
        .map(|p| links.page_link(p));

    PageNavigation {
        prev,
        next,
        total,
        pages,
    }
}

/// A page of results together with its navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(flatten)]
    pub navigation: PageNavigation,
    #[serde(rename = "Results")]
    pub results: Vec<T>,
}

impl<T> PageEnvelope<T> {
    pub fn new(navigation: PageNavigation, results: Vec<T>) -> Self {
        Self {
            navigation,
            results,
        }
    }

    pub fn total(&self) -> u64 {
        self.navigation.total
    }

    /// Replace the items, keeping navigation
    pub fn map<U, F>(self, f: F) -> PageEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        PageEnvelope {
            navigation: self.navigation,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
