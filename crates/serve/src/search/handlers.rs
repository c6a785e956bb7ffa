//! Search API handlers
//!
//! # Endpoints
//!
//! - `GET /api/search?query=..&page=..&pageSize=..&method=..&sortby=..&orderby=..`
//!
//! # Examples
//!
//! ```text
//! GET /api/search?query=borrow+checker
//! GET /api/search?query=borrow+checker&method=%22matchall%22&page=1&pageSize=10
//! ```

use crate::handlers::AppState;
use crate::links::{base_url, endpoint, QueryLinkBuilder, SEARCH_PATH};
use crate::search::types::{ApiError, SearchParams};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use stackquery_core::search::SearchOutcome;
use tracing::{info, warn};

/// Informational body returned when no query text is supplied
pub const NO_QUERY_MESSAGE: &str = "No query provided";

/// Body of the 404 returned when a query matches nothing
pub const NO_RESULTS_MESSAGE: &str = "No results found";

/// Creates the search routes
///
/// # Examples
///
/// ```rust,no_run
/// use axum::Router;
/// use stackquery_serve::search::handlers::search_routes;
/// use stackquery_serve::AppState;
///
/// # fn example(state: AppState) {
/// let app: Router = Router::new().nest("/api", search_routes()).with_state(state);
/// # }
/// ```
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/search", get(handle_search))
}

/// GET search handler
///
/// # Errors
///
/// Returns `ApiError::BadRequest` for unparseable parameters or a zero page
/// size, `ApiError::NotFound` when nothing matches and
/// `ApiError::Unavailable` when the result source fails.
pub async fn handle_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let mut query = params.into_query(state.config.effective_default_page_size());
    query.paging = query.paging.with_max_page_size(state.search.max_page_size());

    info!(
        query = %query.text,
        method = ?query.method,
        page = query.paging.page,
        page_size = query.paging.page_size,
        "GET search request"
    );

    let base = base_url(&state.config, &headers).map_err(|e| ApiError::Internal(e.to_string()))?;
    let links = QueryLinkBuilder::for_search(endpoint(&base, SEARCH_PATH), &query);

    match state.search.search(&query, &links).await? {
        SearchOutcome::MissingQuery => Ok((StatusCode::OK, NO_QUERY_MESSAGE).into_response()),
        SearchOutcome::NoResults(_) => {
            warn!(query = %query.text, "Search returned no results");
            Err(ApiError::NotFound(NO_RESULTS_MESSAGE.to_string()))
        }
        SearchOutcome::Page(envelope) => Ok(Json(envelope).into_response()),
    }
}
