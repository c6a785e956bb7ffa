//! Search API request and error types
//!
//! Query parameter names follow the public contract:
//! `query`, `page`, `pageSize`, `method`, `sortby`, `orderby`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use stackquery_core::search::{PagingInfo, SearchQuery};
use stackquery_core::StackQueryError;
use thiserror::Error;
use tracing::{error, warn};

/// Query parameters of `GET /api/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query; absent or blank short-circuits the search
    #[serde(default)]
    pub query: Option<String>,
    /// Zero-based page index
    #[serde(default)]
    pub page: Option<u32>,
    /// Results per page
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,
    /// Strategy token, matched verbatim (quotes included)
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub sortby: Option<String>,
    #[serde(default)]
    pub orderby: Option<String>,
}

impl SearchParams {
    /// Build the core request, falling back to `default_page_size`
    pub fn into_query(self, default_page_size: u32) -> SearchQuery {
        let paging = PagingInfo {
            page: self.page.unwrap_or(0),
            page_size: self.page_size.unwrap_or(default_page_size),
        };

        SearchQuery::new(self.query.unwrap_or_default())
            .with_method(self.method)
            .with_sort_by(self.sortby)
            .with_order_by(self.orderby)
            .with_paging(paging)
    }
}

/// Query parameters of `GET /api/questions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, rename = "pageSize")]
    pub page_size: Option<u32>,
}

impl PageParams {
    pub fn into_paging(self, default_page_size: u32, max_page_size: u32) -> PagingInfo {
        PagingInfo::new(
            self.page.unwrap_or(0),
            self.page_size.unwrap_or(default_page_size),
        )
        .with_max_page_size(max_page_size)
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Optional error details
    pub details: Option<String>,
}

/// Errors surfaced by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request parameters
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The query matched nothing, or the resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The ranked result source failed, timed out or rejected the request
    #[error("Search unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StackQueryError> for ApiError {
    fn from(err: StackQueryError) -> Self {
        match err {
            StackQueryError::Validation { message } => ApiError::BadRequest(message),
            StackQueryError::NotFound { resource } => ApiError::NotFound(resource),
            StackQueryError::SearchUnavailable { message } => ApiError::Unavailable(message),
            e @ StackQueryError::Database(_) => ApiError::Unavailable(e.to_string()),
            e if e.is_retryable() => ApiError::Unavailable(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            ApiError::BadRequest(msg) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "Invalid request".to_string(), Some(msg))
            }
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, what, None),
            ApiError::Unavailable(msg) => {
                error!("Search unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Search unavailable".to_string(),
                    None,
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_deserialization() {
        let params: SearchParams = serde_json::from_value(serde_json::json!({
            "query": "iterator",
            "page": 2,
            "pageSize": 20,
            "method": "\"matchall\"",
        }))
        .unwrap();

        let query = params.into_query(5);
        assert_eq!(query.text, "iterator");
        assert_eq!(query.paging, PagingInfo { page: 2, page_size: 20 });
        assert_eq!(query.method.as_deref(), Some("\"matchall\""));
        assert!(query.sort_by.is_none());
    }

    #[test]
    fn test_search_params_defaults() {
        let query = SearchParams::default().into_query(5);
        assert!(!query.has_text());
        assert_eq!(query.paging, PagingInfo { page: 0, page_size: 5 });
    }

    #[test]
    fn test_zero_page_size_is_kept_for_validation() {
        let params = SearchParams {
            query: Some("x".to_string()),
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(params.into_query(5).paging.page_size, 0);
    }

    #[test]
    fn test_page_params_clamp() {
        let params = PageParams {
            page: Some(1),
            page_size: Some(500),
        };
        assert_eq!(params.into_paging(5, 25), PagingInfo { page: 1, page_size: 25 });
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(StackQueryError::validation("bad")),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(StackQueryError::search_unavailable("down")),
            ApiError::Unavailable(_)
        ));
        assert!(matches!(
            ApiError::from(StackQueryError::timeout("search")),
            ApiError::Unavailable(_)
        ));
        assert!(matches!(
            ApiError::from(StackQueryError::config("broken")),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("No results found".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unavailable("x".into()).into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
