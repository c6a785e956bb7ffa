//! In-process ranked result source with canned results
//!
//! Results are registered per `(strategy, query)` pair and served with the
//! same ordering and slicing rules as the PostgreSQL source. Used for tests
//! and for running the CLI against a fixture file without a database.

use crate::search::{
    Ordering, RankedResultSource, SortKey, SortOrder, SourcePage, SourceRecord, SourceRequest,
    Strategy,
};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

/// Ranked result source holding its results in memory
#[derive(Debug, Default)]
pub struct MemorySearchSource {
    entries: HashMap<(Strategy, String), Vec<SourceRecord>>,
    calls: AtomicUsize,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    entries: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    query: String,
    #[serde(default)]
    strategy: Strategy,
    results: Vec<FixtureResult>,
}

#[derive(Debug, Deserialize)]
struct FixtureResult {
    id: i64,
    rank: f64,
    #[serde(default)]
    body: Option<String>,
}

impl MemorySearchSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the full result list `strategy` yields for `query`
    pub fn insert<S, I>(&mut self, strategy: Strategy, query: S, records: I)
    where
        S: Into<String>,
        I: IntoIterator<Item = (i64, f64, Option<String>)>,
    {
        let records = records
            .into_iter()
            .map(|(id, rank, body)| SourceRecord::from_parts(strategy, id, rank, body))
            .collect();
        self.entries.insert((strategy, query.into()), records);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with<S, I>(mut self, strategy: Strategy, query: S, records: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (i64, f64, Option<String>)>,
    {
        self.insert(strategy, query, records);
        self
    }

    /// Load canned results from a JSON fixture:
    ///
    /// ```json
    /// { "entries": [ { "query": "borrow checker", "strategy": "match_all",
    ///                  "results": [ { "id": 1, "rank": 0.8, "body": "..." } ] } ] }
    /// ```
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let fixture: FixtureFile = serde_json::from_str(content)?;
        let mut source = Self::new();
        for entry in fixture.entries {
            source.insert(
                entry.strategy,
                entry.query,
                entry.results.into_iter().map(|r| (r.id, r.rank, r.body)),
            );
        }
        Ok(source)
    }

    /// Number of `execute` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn sort(records: &mut [SourceRecord], ordering: Ordering) {
        records.sort_by(|a, b| {
            let primary = match ordering.key {
                SortKey::Rank => a.rank().total_cmp(&b.rank()),
                SortKey::Id => a.id().cmp(&b.id()),
            };
            let primary = match ordering.order {
                SortOrder::Asc => primary,
                SortOrder::Desc => primary.reverse(),
            };
            primary.then_with(|| a.id().cmp(&b.id()))
        });
    }
}

#[async_trait]
impl RankedResultSource for MemorySearchSource {
    async fn execute(&self, strategy: Strategy, request: SourceRequest<'_>) -> Result<SourcePage> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);

        let ordering = Ordering::resolve(request.sort_by, request.order_by)?;
        let Some(all) = self.entries.get(&(strategy, request.query.to_string())) else {
            return Ok(SourcePage::empty());
        };

        let mut sorted = all.clone();
        Self::sort(&mut sorted, ordering);

        let total = sorted.len() as u64;
        let offset = usize::try_from(request.paging.offset()).unwrap_or(usize::MAX);
        let records = sorted
            .into_iter()
            .skip(offset)
            .take(request.paging.page_size as usize)
            .collect();

        Ok(SourcePage { records, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::PagingInfo;

    fn source() -> MemorySearchSource {
        MemorySearchSource::new().with(
            Strategy::BestMatch,
            "rust",
            vec![
                (4, 0.5, None),
                (2, 0.9, Some("two".to_string())),
                (3, 0.5, None),
                (1, 0.1, None),
            ],
        )
    }

    #[test]
    fn test_unknown_query_is_empty() {
        let source = source();
        let page = tokio_test::block_on(source.execute(
            Strategy::MatchAll,
            SourceRequest::new("rust", PagingInfo::default()),
        ))
        .unwrap();

        assert_eq!(page, SourcePage::empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_orders_by_rank_then_id() {
        let source = source();
        let page = source
            .execute(
                Strategy::BestMatch,
                SourceRequest::new("rust", PagingInfo::new(0, 10)),
            )
            .await
            .unwrap();

        let ids: Vec<i64> = page.records.iter().map(SourceRecord::id).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn test_slices_but_reports_full_total() {
        let source = source();
        let page = source
            .execute(
                Strategy::BestMatch,
                SourceRequest::new("rust", PagingInfo::new(1, 3)),
            )
            .await
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id(), 1);
        assert_eq!(page.total, 4);

        let beyond = source
            .execute(
                Strategy::BestMatch,
                SourceRequest::new("rust", PagingInfo::new(9, 3)),
            )
            .await
            .unwrap();
        assert!(beyond.records.is_empty());
        assert_eq!(beyond.total, 4);
    }

    #[tokio::test]
    async fn test_sort_by_rank_ascending() {
        let source = source();
        let mut request = SourceRequest::new("rust", PagingInfo::new(0, 10));
        request.sort_by = Some("rank");
        request.order_by = Some("asc");

        let page = source.execute(Strategy::BestMatch, request).await.unwrap();
        let ids: Vec<i64> = page.records.iter().map(SourceRecord::id).collect();
        assert_eq!(ids, vec![1, 3, 4, 2]);
    }

    #[tokio::test]
    async fn test_sort_by_id_descending() {
        let source = source();
        let mut request = SourceRequest::new("rust", PagingInfo::new(0, 10));
        request.sort_by = Some("id");
        request.order_by = Some("desc");

        let page = source.execute(Strategy::BestMatch, request).await.unwrap();
        let ids: Vec<i64> = page.records.iter().map(SourceRecord::id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn test_invalid_sort_is_rejected() {
        let source = source();
        let mut request = SourceRequest::new("rust", PagingInfo::default());
        request.sort_by = Some("votes");
        assert!(source.execute(Strategy::BestMatch, request).await.is_err());
    }

    #[test]
    fn test_fixture_parsing() {
        let json = r#"{
            "entries": [
                { "query": "borrow", "strategy": "match_all",
                  "results": [ { "id": 10, "rank": 1.0, "body": "b" } ] },
                { "query": "borrow",
                  "results": [ { "id": 11, "rank": 0.3 } ] }
            ]
        }"#;
        let source = MemorySearchSource::from_json_str(json).unwrap();
        assert!(source
            .entries
            .contains_key(&(Strategy::MatchAll, "borrow".to_string())));
        assert!(source
            .entries
            .contains_key(&(Strategy::BestMatch, "borrow".to_string())));
    }
}
