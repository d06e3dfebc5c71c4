//! Docsbot API Server
//!
//! Loads configuration, builds the document index, and serves the
//! chatbot HTTP API.

use anyhow::Context;
use docsbot_api::{create_router, state::AppState};
use docsbot_core::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsbot_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration; a missing API key refuses startup
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // Ensure the docs directory exists
    let docs_dir = std::path::Path::new(&config.index.docs_dir);
    if !docs_dir.exists() {
        tracing::warn!(
            "The '{}' directory does not exist. Creating it; add your documents there.",
            config.index.docs_dir
        );
        std::fs::create_dir_all(docs_dir)
            .with_context(|| format!("failed to create docs directory {}", docs_dir.display()))?;
    }

    // Create application state and build the initial index. A failed build
    // leaves the index absent; the server still starts and queries answer
    // with the unavailability message until a successful reload.
    let state = Arc::new(AppState::new(config));
    if let Err(e) = state.rebuild_index().await {
        tracing::error!("Initial index build failed: {e}");
    }

    // Create router and start server
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Docsbot API server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
