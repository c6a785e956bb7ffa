//! Ranked result source interface
//!
//! The full-text backend is a black box that, given a strategy and a query,
//! returns one page of records ordered by relevance together with the total
//! number of matches across all pages.

use crate::search::{PagingInfo, SearchQuery, SourceRecord, Strategy};
use crate::Result;
use async_trait::async_trait;

/// Parameters forwarded to the result source for one call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRequest<'a> {
    pub query: &'a str,
    pub paging: PagingInfo,
    pub sort_by: Option<&'a str>,
    pub order_by: Option<&'a str>,
}

impl<'a> SourceRequest<'a> {
    pub fn new(query: &'a str, paging: PagingInfo) -> Self {
        Self {
            query,
            paging,
            sort_by: None,
            order_by: None,
        }
    }
}

impl<'a> From<&'a SearchQuery> for SourceRequest<'a> {
    fn from(query: &'a SearchQuery) -> Self {
        Self {
            query: &query.text,
            paging: query.paging,
            sort_by: query.sort_by.as_deref(),
            order_by: query.order_by.as_deref(),
        }
    }
}

/// One page of records plus the match count across every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePage {
    pub records: Vec<SourceRecord>,
    pub total: u64,
}

impl SourcePage {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Backend able to run every [`Strategy`].
///
/// Implementations must:
/// - order records by the requested key (relevance, descending, by default)
///   and break ties by ascending id;
/// - return at most `paging.page_size` records for `paging.page`;
/// - report the true total across all pages, even when the page is empty;
/// - treat "no matches" as an empty page with a zero total, not an error.
///
/// A single instance is shared by concurrent requests.
#[async_trait]
pub trait RankedResultSource: Send + Sync {
    async fn execute(&self, strategy: Strategy, request: SourceRequest<'_>) -> Result<SourcePage>;

    async fn best_match(&self, request: SourceRequest<'_>) -> Result<SourcePage> {
        self.execute(Strategy::BestMatch, request).await
    }

    async fn match_all(&self, request: SourceRequest<'_>) -> Result<SourcePage> {
        self.execute(Strategy::MatchAll, request).await
    }
}
