//! Application state management

use std::path::Path;
use std::sync::Arc;

use docsbot_core::{AppConfig, EmbeddingClient, LlmClient, Result};
use docsbot_index::{
    build_index, ApiEmbedding, DeepSeekClient, QueryEngine, VectorIndex,
    INDEX_UNAVAILABLE_MESSAGE, QUERY_FAILED_MESSAGE,
};
use tokio::sync::RwLock;

/// Application state shared across handlers
///
/// The index reference is the only cross-request mutable state. Queries
/// clone the `Arc` under a read lock, so a concurrent reload never exposes
/// a half-built index: queries see the old index until the swap completes.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// LLM client
    llm: Arc<dyn LlmClient>,

    /// Embedding client
    embedder: Arc<dyn EmbeddingClient>,

    /// Shared document index; `None` means "not ready"
    index: RwLock<Option<Arc<VectorIndex>>>,
}

impl AppState {
    /// Create application state with provider clients built from config
    pub fn new(config: AppConfig) -> Self {
        let llm = Arc::new(DeepSeekClient::from_config(&config.llm));
        let embedder = Arc::new(ApiEmbedding::from_config(&config.llm));
        Self::with_clients(config, llm, embedder)
    }

    /// Create application state with injected clients
    pub fn with_clients(
        config: AppConfig,
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn EmbeddingClient>,
    ) -> Self {
        Self {
            config,
            llm,
            embedder,
            index: RwLock::new(None),
        }
    }

    /// Check whether an index is currently loaded
    pub async fn has_index(&self) -> bool {
        self.index.read().await.is_some()
    }

    /// Rebuild the index from the docs directory
    ///
    /// The reference is replaced unconditionally: on success the new index
    /// is swapped in; on failure the reference is cleared, discarding any
    /// previously working index.
    pub async fn rebuild_index(&self) -> Result<()> {
        let dir = Path::new(&self.config.index.docs_dir);

        match build_index(dir, &self.config.index, self.embedder.as_ref()).await {
            Ok(index) => {
                *self.index.write().await = Some(Arc::new(index));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error constructing index: {e}");
                *self.index.write().await = None;
                Err(e)
            }
        }
    }

    /// Answer a question against the current index
    ///
    /// Downstream failures never propagate; they are logged and converted
    /// to fixed human-readable strings.
    pub async fn generate_response(&self, input_text: &str) -> String {
        let index = self.index.read().await.clone();

        let Some(index) = index else {
            tracing::error!("Index is not loaded");
            return INDEX_UNAVAILABLE_MESSAGE.to_string();
        };

        let engine = QueryEngine::new(
            index,
            self.llm.clone(),
            self.embedder.clone(),
            self.config.index.clone(),
        );

        match engine.answer(input_text).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Error generating response: {e}");
                QUERY_FAILED_MESSAGE.to_string()
            }
        }
    }
}
