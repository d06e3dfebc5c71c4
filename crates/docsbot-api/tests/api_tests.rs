//! API Integration Tests
//!
//! Drives the router with stub LLM and embedding clients so no network
//! or credentials are needed.

use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use docsbot_api::{create_router, state::AppState};
use docsbot_core::{AppConfig, BotError, EmbeddingClient, LlmClient, Result};
use docsbot_index::{INDEX_UNAVAILABLE_MESSAGE, QUERY_FAILED_MESSAGE};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const STUB_ANSWER: &str = "Vacation policy grants 15 days per year.";

/// LLM stub returning a canned answer
struct StubLlm;

#[async_trait]
impl LlmClient for StubLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(STUB_ANSWER.to_string())
    }
}

/// LLM stub that always fails
struct FailingLlm;

#[async_trait]
impl LlmClient for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(BotError::Llm("provider unreachable".to_string()))
    }
}

/// Embedding stub producing a constant vector
struct StubEmbedding;

#[async_trait]
impl EmbeddingClient for StubEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0]).collect())
    }
}

/// Build a test app over a temp docs directory
fn test_app_with_llm(docs_dir: &TempDir, llm: Arc<dyn LlmClient>) -> (Router, Arc<AppState>) {
    let mut config = AppConfig::default();
    config.llm.api_key = "sk-test".to_string();
    config.index.docs_dir = docs_dir.path().display().to_string();

    let state = Arc::new(AppState::with_clients(config, llm, Arc::new(StubEmbedding)));
    (create_router(state.clone()), state)
}

fn test_app(docs_dir: &TempDir) -> (Router, Arc<AppState>) {
    test_app_with_llm(docs_dir, Arc::new(StubLlm))
}

/// Helper to create a JSON request
fn create_json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    match body {
        Some(json_body) => builder
            .body(Body::from(serde_json::to_string(&json_body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// =============================================================================
// Hello Tests
// =============================================================================

#[tokio::test]
async fn test_hello_always_succeeds() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/chatbot/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Hello from your DeepSeek-powered chatbot!");
    assert_eq!(json["data"], json!({}));
}

// =============================================================================
// Chat Validation Tests
// =============================================================================

#[tokio::test]
async fn test_chat_missing_input_text() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    let request = create_json_request("POST", "/api/chatbot", Some(json!({})));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json, json!({ "error": "input_text is required" }));
}

#[tokio::test]
async fn test_chat_empty_input_text() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    let request = create_json_request("POST", "/api/chatbot", Some(json!({ "input_text": "" })));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json, json!({ "error": "input_text is required" }));
}

#[tokio::test]
async fn test_chat_null_input_text() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    let request =
        create_json_request("POST", "/api/chatbot", Some(json!({ "input_text": null })));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Chat Query Tests
// =============================================================================

#[tokio::test]
async fn test_chat_without_index_returns_unavailability() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    // No reload performed: index is absent
    let request = create_json_request(
        "POST",
        "/api/chatbot",
        Some(json!({ "input_text": "What is the vacation policy?" })),
    );
    let response = app.oneshot(request).await.unwrap();

    // Downstream unavailability is still a 200
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["response"], INDEX_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_chat_after_reload_returns_answer() {
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("hr.txt"), "Vacation policy: 15 days.").unwrap();
    let (app, _) = test_app(&docs);

    let reload = create_json_request("POST", "/api/chatbot/reload", None);
    let response = app.clone().oneshot(reload).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json, json!({ "message": "Index reloaded successfully" }));

    let request = create_json_request(
        "POST",
        "/api/chatbot",
        Some(json!({ "input_text": "How many vacation days?" })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["response"], STUB_ANSWER);
}

#[tokio::test]
async fn test_chat_provider_failure_is_still_200() {
    let docs = TempDir::new().unwrap();
    fs::write(docs.path().join("hr.txt"), "Vacation policy: 15 days.").unwrap();
    let (app, state) = test_app_with_llm(&docs, Arc::new(FailingLlm));

    state.rebuild_index().await.unwrap();

    let request = create_json_request(
        "POST",
        "/api/chatbot",
        Some(json!({ "input_text": "How many vacation days?" })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["response"], QUERY_FAILED_MESSAGE);
}

// =============================================================================
// Reload Tests
// =============================================================================

#[tokio::test]
async fn test_reload_empty_directory_fails() {
    let docs = TempDir::new().unwrap();
    let (app, _) = test_app(&docs);

    let reload = create_json_request("POST", "/api/chatbot/reload", None);
    let response = app.oneshot(reload).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = response_json(response).await;
    assert_eq!(json, json!({ "error": "Failed to reload index" }));
}

#[tokio::test]
async fn test_failed_reload_destroys_working_index() {
    let docs = TempDir::new().unwrap();
    let doc_path = docs.path().join("hr.txt");
    fs::write(&doc_path, "Vacation policy: 15 days.").unwrap();
    let (app, state) = test_app(&docs);

    // First reload succeeds
    let reload = create_json_request("POST", "/api/chatbot/reload", None);
    let response = app.clone().oneshot(reload).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.has_index().await);

    // Empty the directory and reload again: 500, and the old index is gone
    fs::remove_file(&doc_path).unwrap();
    let reload = create_json_request("POST", "/api/chatbot/reload", None);
    let response = app.clone().oneshot(reload).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!state.has_index().await);

    let request = create_json_request(
        "POST",
        "/api/chatbot",
        Some(json!({ "input_text": "Still there?" })),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["response"], INDEX_UNAVAILABLE_MESSAGE);
}
