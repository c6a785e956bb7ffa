//! Search request model

use crate::{Result, StackQueryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Largest page size a caller can ask for; larger values are clamped
pub const MAX_PAGE_SIZE: u32 = 50;

/// Zero-based page index plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub page: u32,
    pub page_size: u32,
}

impl PagingInfo {
    /// Create paging info, clamping the page size to [`MAX_PAGE_SIZE`]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size: page_size.min(MAX_PAGE_SIZE),
        }
    }

    /// Re-clamp the page size to a tighter, configured ceiling
    pub fn with_max_page_size(self, max: u32) -> Self {
        Self {
            page: self.page,
            page_size: self.page_size.min(max),
        }
    }

    /// Reject paging the pagination math cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(StackQueryError::validation(
                "Page size must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Number of records to skip to reach this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    /// Same page size, different page index
    pub fn at_page(&self, page: u32) -> Self {
        Self {
            page,
            page_size: self.page_size,
        }
    }
}

impl Default for PagingInfo {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A single search request. Built once per request and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text to search for
    pub text: String,
    /// Raw method token, see [`crate::search::Strategy::select`]
    pub method: Option<String>,
    /// Opaque sort key forwarded to the result source
    pub sort_by: Option<String>,
    /// Opaque order key forwarded to the result source
    pub order_by: Option<String>,
    pub paging: PagingInfo,
}

impl SearchQuery {
    /// Create a query with default paging and no optional parameters
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            method: None,
            sort_by: None,
            order_by: None,
            paging: PagingInfo::default(),
        }
    }

    pub fn with_method<S: Into<String>>(mut self, method: Option<S>) -> Self {
        self.method = non_empty(method);
        self
    }

    pub fn with_sort_by<S: Into<String>>(mut self, sort_by: Option<S>) -> Self {
        self.sort_by = non_empty(sort_by);
        self
    }

    pub fn with_order_by<S: Into<String>>(mut self, order_by: Option<S>) -> Self {
        self.order_by = non_empty(order_by);
        self
    }

    pub fn with_paging(mut self, paging: PagingInfo) -> Self {
        self.paging = paging;
        self
    }

    /// Whether a query was supplied. Whitespace is still searched.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

fn non_empty<S: Into<String>>(value: Option<S>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.is_empty())
}

/// Column a result page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Rank,
    Id,
}

impl SortKey {
    /// Parse an optional caller value; `None` means the default
    pub fn parse_opt(value: Option<&str>) -> Result<Self> {
        value.map_or(Ok(Self::default()), str::parse)
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Rank => "rank",
            Self::Id => "id",
        }
    }

    /// Direction used when the caller names this key without an order
    pub fn natural_order(&self) -> SortOrder {
        match self {
            Self::Rank => SortOrder::Desc,
            Self::Id => SortOrder::Asc,
        }
    }
}

impl FromStr for SortKey {
    type Err = StackQueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rank" | "relevance" => Ok(Self::Rank),
            "id" => Ok(Self::Id),
            other => Err(StackQueryError::invalid_sort(format!(
                "unknown sort key '{}'",
                other
            ))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse_opt(value: Option<&str>) -> Result<Option<Self>> {
        value.map(str::parse).transpose()
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = StackQueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(StackQueryError::invalid_sort(format!(
                "unknown order '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// Resolved ordering for a result page: the key, its direction, then `id ASC`
/// as tie-break so repeated calls page identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Ordering {
    /// Resolve the opaque `sortby` / `orderby` strings
    pub fn resolve(sort_by: Option<&str>, order_by: Option<&str>) -> Result<Self> {
        let key = SortKey::parse_opt(sort_by)?;
        let order = SortOrder::parse_opt(order_by)?.unwrap_or_else(|| key.natural_order());
        Ok(Self { key, order })
    }

    /// `ORDER BY` clause body built from whitelisted identifiers only
    pub fn sql(&self) -> String {
        match self.key {
            SortKey::Id => format!("id {}", self.order),
            SortKey::Rank => format!("rank {}, id ASC", self.order),
        }
    }
}

impl Default for Ordering {
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            order: SortOrder::Desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults_and_clamp() {
        let paging = PagingInfo::default();
        assert_eq!(paging.page, 0);
        assert_eq!(paging.page_size, DEFAULT_PAGE_SIZE);

        let clamped = PagingInfo::new(2, 500);
        assert_eq!(clamped.page_size, MAX_PAGE_SIZE);
        assert_eq!(clamped.with_max_page_size(20).page_size, 20);
    }

    #[test]
    fn test_paging_validation_and_offset() {
        assert!(PagingInfo::new(0, 0).validate().is_err());
        let paging = PagingInfo::new(3, 10);
        assert!(paging.validate().is_ok());
        assert_eq!(paging.offset(), 30);
        assert_eq!(paging.at_page(4).offset(), 40);
    }

    #[test]
    fn test_offset_does_not_overflow_u32() {
        let paging = PagingInfo::new(u32::MAX, MAX_PAGE_SIZE);
        assert_eq!(paging.offset(), u64::from(u32::MAX) * 50);
    }

    #[test]
    fn test_query_builder_normalizes_empty_params() {
        let query = SearchQuery::new("rust lifetimes")
            .with_method(Some("\"matchall\""))
            .with_sort_by(Some(""))
            .with_order_by(None::<String>);

        assert_eq!(query.method.as_deref(), Some("\"matchall\""));
        assert!(query.sort_by.is_none());
        assert!(query.order_by.is_none());
        assert!(query.has_text());
        assert!(!SearchQuery::new("").has_text());
        assert!(SearchQuery::new("   ").has_text());
    }

    #[test]
    fn test_ordering_resolution() {
        assert_eq!(Ordering::resolve(None, None).unwrap(), Ordering::default());

        let by_id = Ordering::resolve(Some("id"), None).unwrap();
        assert_eq!(by_id.order, SortOrder::Asc);
        assert_eq!(by_id.sql(), "id ASC");

        let rank_asc = Ordering::resolve(Some("RANK"), Some("asc")).unwrap();
        assert_eq!(rank_asc.sql(), "rank ASC, id ASC");
    }

    #[test]
    fn test_ordering_rejects_unknown_keys() {
        assert!(matches!(
            Ordering::resolve(Some("score; DROP TABLE posts"), None),
            Err(StackQueryError::InvalidSort { .. })
        ));
        assert!(Ordering::resolve(None, Some("sideways")).is_err());
    }
}
