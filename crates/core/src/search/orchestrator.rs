//! Search orchestration
//!
//! One request runs `validate -> select strategy -> execute -> project ->
//! paginate` and ends in a [`SearchOutcome`]. The orchestrator holds no
//! per-request state, so a single instance serves concurrent requests.

use crate::search::{
    paginate, project_all, PageEnvelope, PageLinkBuilder, RankedResult, RankedResultSource,
    SearchQuery, SourceRequest, Strategy, MAX_PAGE_SIZE,
};
use crate::{Result, StackQueryError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, info_span, Instrument};

/// Default upper bound on a single call into the result source
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal state of one search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No query text was supplied; the source was not consulted
    MissingQuery,
    /// The query matched nothing
    NoResults(PageEnvelope<RankedResult>),
    /// A page of results, possibly empty when the page index is past the end
    Page(PageEnvelope<RankedResult>),
}

impl SearchOutcome {
    pub fn envelope(&self) -> Option<&PageEnvelope<RankedResult>> {
        match self {
            Self::MissingQuery => None,
            Self::NoResults(envelope) | Self::Page(envelope) => Some(envelope),
        }
    }

    pub fn into_envelope(self) -> Option<PageEnvelope<RankedResult>> {
        match self {
            Self::MissingQuery => None,
            Self::NoResults(envelope) | Self::Page(envelope) => Some(envelope),
        }
    }
}

/// Drives a search request against a shared [`RankedResultSource`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stackquery_core::search::{
///     MemorySearchSource, SearchOrchestrator, SearchOutcome, SearchQuery, Strategy,
/// };
///
/// # async fn example() -> stackquery_core::Result<()> {
/// let source = MemorySearchSource::new().with(
///     Strategy::BestMatch,
///     "lifetimes",
///     vec![(1, 0.9, Some("body".to_string()))],
/// );
/// let orchestrator = SearchOrchestrator::new(Arc::new(source));
///
/// let links = |page: u32| format!("/api/search?query=lifetimes&page={}", page);
/// let outcome = orchestrator.search(&SearchQuery::new("lifetimes"), &links).await?;
/// assert!(matches!(outcome, SearchOutcome::Page(_)));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SearchOrchestrator {
    source: Arc<dyn RankedResultSource>,
    timeout: Duration,
    max_page_size: u32,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn RankedResultSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_SOURCE_TIMEOUT,
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    /// Bound each source call; an expired call is reported as unavailable
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.min(MAX_PAGE_SIZE);
        self
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Run one search request to completion
    ///
    /// # Errors
    ///
    /// - [`StackQueryError::Validation`] when the page size is zero
    /// - [`StackQueryError::SearchUnavailable`] when the source fails, times
    ///   out or rejects the sort parameters
    pub async fn search<L>(&self, query: &SearchQuery, links: &L) -> Result<SearchOutcome>
    where
        L: PageLinkBuilder + Sync + ?Sized,
    {
        if !query.has_text() {
            debug!("Empty query, skipping search");
            return Ok(SearchOutcome::MissingQuery);
        }

        let mut query = query.clone();
        query.paging = query.paging.with_max_page_size(self.max_page_size);
        query.paging.validate()?;

        let strategy = Strategy::select(query.method.as_deref());
        let span = info_span!(
            "search",
            strategy = %strategy,
            page = query.paging.page,
            page_size = query.paging.page_size,
        );

        self.run(strategy, &query, links).instrument(span).await
    }

    async fn run<L>(&self, strategy: Strategy, query: &SearchQuery, links: &L) -> Result<SearchOutcome>
    where
        L: PageLinkBuilder + Sync + ?Sized,
    {
        let request = SourceRequest::from(query);

        let page = match tokio::time::timeout(self.timeout, self.source.execute(strategy, request))
            .await
        {
            Ok(Ok(page)) => page,
            Ok(Err(e)) => {
                error!(error = %e, category = %e.category(), "Ranked result source failed");
                return Err(StackQueryError::search_unavailable(e.to_string()));
            }
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis() as u64, "Ranked result source timed out");
                return Err(StackQueryError::search_unavailable(format!(
                    "source did not answer within {:?}",
                    self.timeout
                )));
            }
        };

        let total = page.total;
        let results = project_all(strategy, page.records);
        let navigation = paginate(query.paging, total, links);

        info!(
            total,
            pages = navigation.pages,
            returned = results.len(),
            "Search completed"
        );

        let envelope = PageEnvelope::new(navigation, results);
        if total == 0 {
            Ok(SearchOutcome::NoResults(envelope))
        } else {
            Ok(SearchOutcome::Page(envelope))
        }
    }
}
