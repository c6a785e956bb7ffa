//! Search API module
//!
//! The search module is organized into:
//! - `types`: Request parameters and error types
//! - `handlers`: HTTP handler and routes for `GET /api/search`
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use stackquery_serve::search::handlers::search_routes;
//! use stackquery_serve::AppState;
//!
//! # fn example(state: AppState) {
//! let app: Router = Router::new().nest("/api", search_routes()).with_state(state);
//! # }
//! ```

pub mod handlers;
pub mod types;

pub use handlers::{handle_search, search_routes, NO_QUERY_MESSAGE, NO_RESULTS_MESSAGE};
pub use types::{ApiError, ErrorResponse, PageParams, SearchParams};
