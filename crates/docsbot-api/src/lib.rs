//! Docsbot API - HTTP server
//!
//! Exposes the chatbot over three routes: query, reload, and a
//! liveness probe.

pub mod handlers;
pub mod routes;
pub mod state;

use axum::http::HeaderValue;
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with CORS and request tracing
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.server.client_url.as_deref());

    routes::api_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Build the CORS layer: configured origin when set, permissive otherwise
fn cors_layer(client_url: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match client_url.and_then(|url| url.parse::<HeaderValue>().ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}
