//! Integration tests for the question listing endpoints

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use stackquery_core::questions::{MemoryQuestionSource, QuestionSummary};
use stackquery_core::search::MemorySearchSource;
use stackquery_serve::{create_app, AppState, ServerConfig};
use std::sync::Arc;

fn create_test_server(count: i64) -> TestServer {
    let config = ServerConfig::default();
    let questions = MemoryQuestionSource::new(
        (1..=count).map(|id| QuestionSummary::new(id, format!("Question {}", id))),
    );
    let state = AppState::from_sources(
        config.clone(),
        Arc::new(MemorySearchSource::new()),
        Arc::new(questions),
    );
    TestServer::new(create_app(state, &config)).unwrap()
}

#[tokio::test]
async fn test_list_questions_first_page() {
    let server = create_test_server(12);

    let response = server.get("/api/questions").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = response.json();
    assert_eq!(json["Total"], 12);
    assert_eq!(json["Pages"], 3);
    assert_eq!(json["Prev"], Value::Null);
    assert!(json["Next"]
        .as_str()
        .unwrap()
        .ends_with("/api/questions?page=1&pageSize=5"));

    let questions = json["Questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[0]["Title"], "Question 1");
    assert!(questions[0]["Url"]
        .as_str()
        .unwrap()
        .ends_with("/api/questions/1"));
}

#[tokio::test]
async fn test_list_questions_last_page() {
    let server = create_test_server(12);

    let response = server
        .get("/api/questions")
        .add_query_param("page", 2)
        .add_query_param("pageSize", 5)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = response.json();
    assert_eq!(json["Questions"].as_array().unwrap().len(), 2);
    assert_eq!(json["Next"], Value::Null);
    assert!(json["Prev"].as_str().unwrap().contains("page=1"));
}

#[tokio::test]
async fn test_empty_listing_is_ok() {
    let server = create_test_server(0);

    let response = server.get("/api/questions").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = response.json();
    assert_eq!(json["Total"], 0);
    assert_eq!(json["Pages"], 0);
    assert_eq!(json["Questions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_zero_page_size_is_bad_request() {
    let server = create_test_server(3);

    let response = server
        .get("/api/questions")
        .add_query_param("pageSize", 0)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_question() {
    let server = create_test_server(3);

    let response = server.get("/api/questions/2").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = response.json();
    assert_eq!(json["Id"], 2);
    assert_eq!(json["Title"], "Question 2");

    let missing = server.get("/api/questions/42").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}
