//! API module for StackQuery serve crate

use crate::handlers::{handle_get_question, handle_list_questions, AppState};
use crate::search::search_routes;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// API version
pub const API_VERSION: &str = "v1";

/// API routes configuration
pub fn create_routes() -> Router<AppState> {
    let api = search_routes()
        .route("/questions", get(handle_list_questions))
        .route("/questions/:id", get(handle_get_question));

    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(get_version))
        .nest("/api", api)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Get version information
pub async fn get_version() -> impl IntoResponse {
    Json(VersionResponse {
        version: crate::VERSION.to_string(),
        api_version: API_VERSION.to_string(),
        core_version: stackquery_core::VERSION.to_string(),
    })
}

// Response types

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub api_version: String,
    pub core_version: String,
}
