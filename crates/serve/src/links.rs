//! Self-referential navigation links
//!
//! Links are absolute URLs to the same endpoint carrying every request
//! parameter of the original call. Only `page` differs between the links of
//! one response.

use crate::ServerConfig;
use axum::http::{header::HOST, HeaderMap};
use stackquery_core::search::{PageLinkBuilder, SearchQuery};
use tracing::debug;
use url::Url;

/// Path of the search endpoint
pub const SEARCH_PATH: &str = "api/search";

/// Path of the question listing endpoint
pub const QUESTIONS_PATH: &str = "api/questions";

/// Base URL links are built on.
///
/// Preference order: configured public URL, the request `Host` header, then
/// the bind address.
pub fn base_url(config: &ServerConfig, headers: &HeaderMap) -> Result<Url, url::ParseError> {
    if config.public_base_url.is_some() {
        return configured_base_url(config);
    }

    let host = headers.get(HOST).and_then(|value| value.to_str().ok());
    if let Some(host) = host {
        match Url::parse(&format!("http://{}/", host)) {
            Ok(url) => return Ok(url),
            Err(e) => debug!(error = %e, host, "Ignoring unusable Host header"),
        }
    }

    configured_base_url(config)
}

/// Base URL from configuration alone: the public URL, else the bind address
pub fn configured_base_url(config: &ServerConfig) -> Result<Url, url::ParseError> {
    match config.public_base_url {
        Some(ref base) => Ok(with_trailing_slash(base.clone())),
        None => Url::parse(&format!("http://{}:{}/", config.host, config.port)),
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Resolve an endpoint path against a base URL, keeping any base path prefix
pub fn endpoint(base: &Url, path: &str) -> Url {
    base.join(path).unwrap_or_else(|_| base.clone())
}

/// Builds page links for one request
///
/// Parameters are emitted in insertion order followed by `page` and
/// `pageSize`. Absent optional parameters are emitted as empty strings so
/// every link carries the same parameter set.
///
/// # Examples
///
/// ```
/// use stackquery_core::search::PageLinkBuilder;
/// use stackquery_serve::links::QueryLinkBuilder;
/// use url::Url;
///
/// let endpoint = Url::parse("http://localhost:3000/api/search").unwrap();
/// let links = QueryLinkBuilder::new(endpoint, 10).param("query", "async traits");
/// assert_eq!(
///     links.page_link(2),
///     "http://localhost:3000/api/search?query=async+traits&page=2&pageSize=10"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryLinkBuilder {
    endpoint: Url,
    params: Vec<(&'static str, String)>,
    page_size: u32,
}

impl QueryLinkBuilder {
    pub fn new(endpoint: Url, page_size: u32) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
            page_size,
        }
    }

    pub fn param<V: Into<String>>(mut self, name: &'static str, value: V) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Links for a search request: `query`, `method`, `sortby`, `orderby`
    pub fn for_search(endpoint: Url, query: &SearchQuery) -> Self {
        Self::new(endpoint, query.paging.page_size)
            .param("query", query.text.as_str())
            .param("method", query.method.clone().unwrap_or_default())
            .param("sortby", query.sort_by.clone().unwrap_or_default())
            .param("orderby", query.order_by.clone().unwrap_or_default())
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl PageLinkBuilder for QueryLinkBuilder {
    fn page_link(&self, page: u32) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            for (name, value) in &self.params {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("pageSize", &self.page_size.to_string());
        }
        url.into()
    }
}
