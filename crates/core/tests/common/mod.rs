//! Common test helpers for search integration tests

use async_trait::async_trait;
use stackquery_core::search::{
    MemorySearchSource, RankedResultSource, SourcePage, SourceRequest, Strategy,
};
use stackquery_core::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Memory source answering `query` with `count` records for every strategy
///
/// Ranks descend with the id, except that every third record shares its
/// rank with the previous one so that tie-breaking is exercised.
pub fn corpus(query: &str, count: i64) -> MemorySearchSource {
    let mut source = MemorySearchSource::new();
    for strategy in Strategy::ALL {
        source.insert(
            strategy,
            query,
            (1..=count).map(|id| {
                let rank = 1000.0 - (id - id / 3) as f64;
                let body = strategy
                    .returns_body()
                    .then(|| format!("<p>answer {}</p>", id));
                (id, rank, body)
            }),
        );
    }
    source
}

/// Link builder used by the tests: `?query=<q>&page=<n>&pageSize=<m>`
pub fn link(query: &str, page: u32, page_size: u32) -> String {
    format!("/api/search?query={}&page={}&pageSize={}", query, page, page_size)
}

/// Extract `(page, page_size)` back out of a link built by [`link`]
pub fn parse_link(link: &str) -> (u32, u32) {
    let mut page = None;
    let mut page_size = None;
    let params = link.split_once('?').map(|(_, q)| q).unwrap_or_default();
    for pair in params.split('&') {
        match pair.split_once('=') {
            Some(("page", v)) => page = v.parse().ok(),
            Some(("pageSize", v)) => page_size = v.parse().ok(),
            _ => {}
        }
    }
    (page.expect("page in link"), page_size.expect("pageSize in link"))
}

/// Source that counts calls and never matches
#[derive(Default)]
pub struct CountingSource {
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankedResultSource for CountingSource {
    async fn execute(&self, _: Strategy, _: SourceRequest<'_>) -> Result<SourcePage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(SourcePage::empty())
    }
}
