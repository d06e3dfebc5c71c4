//! API route definitions

use crate::handlers::{chat, health};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create chatbot API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chatbot", post(chat::chatbot_handler))
        .route("/api/chatbot/reload", post(chat::reload_handler))
        .route("/api/chatbot/hello", get(health::hello_handler))
}
