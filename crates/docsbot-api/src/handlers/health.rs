//! Liveness handler

use axum::{response::IntoResponse, Json};
use serde::Serialize;

/// Hello response body
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub success: bool,
    pub message: String,
    pub data: serde_json::Value,
}

/// Liveness probe, independent of index state
pub async fn hello_handler() -> impl IntoResponse {
    Json(HelloResponse {
        success: true,
        message: "Hello from your DeepSeek-powered chatbot!".to_string(),
        data: serde_json::json!({}),
    })
}
