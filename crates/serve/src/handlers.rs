//! Application state and question handlers

use crate::links::{base_url, endpoint, QueryLinkBuilder, QUESTIONS_PATH};
use crate::search::{ApiError, PageParams};
use crate::ServerConfig;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use stackquery_core::questions::{list_questions, PgQuestionSource, QuestionSource};
use stackquery_core::search::{
    PageEnvelope, PageNavigation, PgSearchSource, RankedResultSource, SearchOrchestrator,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub search: SearchOrchestrator,
    pub questions: Arc<dyn QuestionSource>,
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state with a database connection pool
    pub async fn new(config: ServerConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.database_url)
            .await?;

        Ok(Self::from_pool(config, pool))
    }

    /// Create application state from an existing pool
    pub fn from_pool(config: ServerConfig, pool: sqlx::PgPool) -> Self {
        Self::from_sources(
            config,
            Arc::new(PgSearchSource::new(pool.clone())),
            Arc::new(PgQuestionSource::new(pool)),
        )
    }

    /// Create application state over arbitrary sources (for testing)
    pub fn from_sources(
        config: ServerConfig,
        search: Arc<dyn RankedResultSource>,
        questions: Arc<dyn QuestionSource>,
    ) -> Self {
        let search = SearchOrchestrator::new(search)
            .with_timeout(Duration::from_millis(config.source_timeout_ms))
            .with_max_page_size(config.max_page_size);

        Self {
            search,
            questions,
            config,
        }
    }
}

/// One entry of the question listing
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionListItem {
    pub title: String,
    pub url: String,
}

/// A single question
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
}

/// Question listing page: navigation plus `Questions`
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    #[serde(flatten)]
    pub navigation: PageNavigation,
    #[serde(rename = "Questions")]
    pub questions: Vec<QuestionListItem>,
}

impl From<PageEnvelope<QuestionListItem>> for QuestionListResponse {
    fn from(envelope: PageEnvelope<QuestionListItem>) -> Self {
        Self {
            navigation: envelope.navigation,
            questions: envelope.results,
        }
    }
}

fn question_url(base: &url::Url, id: i64) -> String {
    endpoint(base, &format!("{}/{}", QUESTIONS_PATH, id)).into()
}

/// Handler for `GET /api/questions`
pub async fn handle_list_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let paging = params.into_paging(
        state.config.effective_default_page_size(),
        state.config.max_page_size,
    );

    info!(page = paging.page, page_size = paging.page_size, "Listing questions");

    let base = base_url(&state.config, &headers).map_err(|e| ApiError::Internal(e.to_string()))?;
    let links = QueryLinkBuilder::new(endpoint(&base, QUESTIONS_PATH), paging.page_size);

    let envelope = list_questions(state.questions.as_ref(), paging, &links).await?;
    let envelope = envelope.map(|q| QuestionListItem {
        url: question_url(&base, q.id),
        title: q.title,
    });

    Ok(Json(envelope.into()))
}

/// Handler for `GET /api/questions/:id`
pub async fn handle_get_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<QuestionResponse>, ApiError> {
    info!(id, "Getting question");

    let question = state
        .questions
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Question {} not found", id)))?;

    let base = base_url(&state.config, &headers).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(QuestionResponse {
        url: question_url(&base, question.id),
        id: question.id,
        title: question.title,
    }))
}
