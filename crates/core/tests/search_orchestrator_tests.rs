//! Integration tests for the search orchestrator
//!
//! These tests drive the complete dispatch and pagination flow against the
//! in-memory result source, covering:
//! - Strategy selection from quoted method tokens
//! - Deterministic ordering and slicing across pages
//! - Navigation links that can be replayed
//! - Empty query, no results and out-of-range pages
//! - Concurrent requests against one shared source

mod common;

use common::{corpus, link, parse_link, CountingSource};
use futures::future::join_all;
use stackquery_core::search::{
    PagingInfo, SearchOrchestrator, SearchOutcome, SearchQuery, Strategy,
};
use std::sync::Arc;

fn orchestrator(count: i64) -> SearchOrchestrator {
    SearchOrchestrator::new(Arc::new(corpus("rust", count)))
}

async fn run(
    orchestrator: &SearchOrchestrator,
    query: &SearchQuery,
) -> SearchOutcome {
    let text = query.text.clone();
    let page_size = query.paging.page_size;
    let links = move |page: u32| link(&text, page, page_size);
    orchestrator
        .search(query, &links)
        .await
        .expect("search should succeed")
}

#[tokio::test]
async fn test_empty_query_never_reaches_source() {
    let source = Arc::new(CountingSource::default());
    let orchestrator = SearchOrchestrator::new(source.clone());

    let outcome = run(&orchestrator, &SearchQuery::new("")).await;
    assert_eq!(outcome, SearchOutcome::MissingQuery);
    assert_eq!(source.calls(), 0);

    run(&orchestrator, &SearchQuery::new("rust")).await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_whitespace_query_is_searched() {
    let orchestrator = SearchOrchestrator::new(Arc::new(corpus(" ", 3)));

    let outcome = run(&orchestrator, &SearchQuery::new(" ")).await;

    let SearchOutcome::Page(envelope) = outcome else {
        panic!("expected a page, got {:?}", outcome);
    };
    assert_eq!(envelope.total(), 3);
}

#[tokio::test]
async fn test_no_results_scenario() {
    let query = SearchQuery::new("zzzznotfound").with_method(Some("\"bestmatch\""));
    let outcome = run(&orchestrator(25), &query).await;

    let SearchOutcome::NoResults(envelope) = outcome else {
        panic!("expected NoResults, got {:?}", outcome);
    };
    assert_eq!(envelope.total(), 0);
    assert_eq!(envelope.navigation.pages, 0);
    assert!(envelope.navigation.prev.is_none());
    assert!(envelope.navigation.next.is_none());
}

#[tokio::test]
async fn test_out_of_range_page_scenario() {
    let query = SearchQuery::new("rust").with_paging(PagingInfo::new(5, 10));
    let outcome = run(&orchestrator(25), &query).await;

    let SearchOutcome::Page(envelope) = outcome else {
        panic!("expected Page, got {:?}", outcome);
    };
    assert!(envelope.results.is_empty());
    assert_eq!(envelope.total(), 25);
    assert_eq!(envelope.navigation.pages, 3);
    assert_eq!(
        envelope.navigation.prev.as_deref(),
        Some(link("rust", 4, 10).as_str())
    );
    assert!(envelope.navigation.next.is_none());
}

#[tokio::test]
async fn test_method_token_selects_strategy() {
    let orchestrator = orchestrator(3);

    let match_all = SearchQuery::new("rust").with_method(Some("\"matchall\""));
    let envelope = run(&orchestrator, &match_all).await.into_envelope().unwrap();
    assert!(envelope.results.iter().all(|r| !r.body.is_empty()));

    let weighted = SearchQuery::new("rust").with_method(Some("\"bestmatchweighted\""));
    let envelope = run(&orchestrator, &weighted).await.into_envelope().unwrap();
    assert_eq!(envelope.results.len(), 3);
    assert!(envelope.results.iter().all(|r| r.body.is_empty()));

    // Unquoted tokens are not recognised and fall back to the default
    let unquoted = SearchQuery::new("rust").with_method(Some("matchall"));
    assert_eq!(Strategy::select(unquoted.method.as_deref()), Strategy::BestMatch);
}

#[tokio::test]
async fn test_pages_partition_results_deterministically() {
    let orchestrator = orchestrator(23);
    let mut seen = Vec::new();

    for page in 0..5 {
        let query = SearchQuery::new("rust").with_paging(PagingInfo::new(page, 5));
        let first = run(&orchestrator, &query).await;
        let second = run(&orchestrator, &query).await;
        assert_eq!(first, second);

        let envelope = first.into_envelope().unwrap();
        seen.extend(envelope.results.iter().map(|r| r.id));
    }

    assert_eq!(seen, (1..=23).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_navigation_links_round_trip() {
    let orchestrator = orchestrator(47);
    let start = SearchQuery::new("rust").with_paging(PagingInfo::new(0, 10));
    let mut envelope = run(&orchestrator, &start).await.into_envelope().unwrap();
    let mut visited = vec![0];

    while let Some(next) = envelope.navigation.next.clone() {
        let (page, page_size) = parse_link(&next);
        assert_eq!(page_size, 10);

        let query = SearchQuery::new("rust").with_paging(PagingInfo::new(page, page_size));
        envelope = run(&orchestrator, &query).await.into_envelope().unwrap();
        visited.push(page);

        assert_eq!(envelope.total(), 47);
        assert_eq!(envelope.navigation.pages, 5);
        let (prev_page, _) = parse_link(envelope.navigation.prev.as_deref().unwrap());
        assert_eq!(prev_page + 1, page);
    }

    assert_eq!(visited, vec![0, 1, 2, 3, 4]);
    assert_eq!(envelope.results.len(), 7);
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let orchestrator = orchestrator(30);

    let queries: Vec<SearchQuery> = (0..12)
        .map(|i| SearchQuery::new("rust").with_paging(PagingInfo::new(i % 4, 5 + i % 3)))
        .collect();

    let concurrent = join_all(queries.iter().map(|q| run(&orchestrator, q))).await;

    for (query, outcome) in queries.iter().zip(concurrent) {
        let sequential = run(&orchestrator, query).await;
        assert_eq!(outcome, sequential);
    }
}
