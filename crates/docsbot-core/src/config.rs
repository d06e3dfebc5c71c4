//! Docsbot Configuration Management
//!
//! Handles configuration from environment variables with sensible
//! defaults for development. The DeepSeek API credential is the only
//! required setting; startup fails without it.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Index construction configuration
    pub index: IndexConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Fails with `ConfigError::MissingRequired` when no API key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Some(host) = lookup("API_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }
        config.server.client_url = lookup("CLIENT_URL");

        // LLM
        config.llm.api_key = lookup("DEEPSEEK_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("DEEPSEEK_API_KEY".to_string()))?;
        if let Some(url) = lookup("DEEPSEEK_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL") {
            config.llm.model = model;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            config.llm.embedding_model = model;
        }

        // Index
        if let Some(dir) = lookup("DOCS_DIR") {
            config.index.docs_dir = dir;
        }

        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed client origin for CORS; permissive when unset
    pub client_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            client_url: None,
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// DeepSeek API key
    pub api_key: String,

    /// API base URL (OpenAI-compatible)
    pub base_url: String,

    /// Chat model name
    pub model: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Maximum tokens for completion
    pub max_tokens: u32,

    /// Temperature for generation
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            embedding_model: "deepseek-embedding".to_string(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Index construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory scanned for documents
    pub docs_dir: String,

    /// Target chunk size in characters
    pub chunk_size: usize,

    /// Overlap between chunks in characters
    pub chunk_overlap: usize,

    /// Number of chunks retrieved per query
    pub top_k: usize,

    /// Maximum context length for the prompt (characters)
    pub max_context_length: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
            top_k: 5,
            max_context_length: 8000,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
