//! Chatbot query and reload handlers

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User's question
    #[serde(default)]
    pub input_text: Option<String>,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Generated answer, or a fixed error string when the index or
    /// provider is unavailable
    pub response: String,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Reload response body
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub message: String,
}

/// Handle chatbot queries
///
/// Downstream index and query failures still produce a 200; only input
/// validation yields a non-200 status.
pub async fn chatbot_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let input_text = req.input_text.unwrap_or_default();
    if input_text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "input_text is required".to_string(),
            }),
        )
            .into_response();
    }

    let response = state.generate_response(&input_text).await;

    Json(ChatResponse { response }).into_response()
}

/// Handle index reload requests
pub async fn reload_handler(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("Reloading index via API call");

    match state.rebuild_index().await {
        Ok(()) => Json(ReloadResponse {
            message: "Index reloaded successfully".to_string(),
        })
        .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to reload index".to_string(),
            }),
        )
            .into_response(),
    }
}
