//! Docsbot Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout docsbot:
//! - Common error types
//! - Shared traits for LLM and embedding clients
//! - Document models produced by the directory loader
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, IndexConfig, LlmConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for docsbot operations
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("No documents found in directory: {0}")]
    EmptyDirectory(String),

    #[error("IO error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Index is not loaded")]
    IndexUnavailable,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;

// ============================================================================
// Document Models
// ============================================================================

/// A document loaded from the watched directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,

    /// Path the document was loaded from
    pub path: PathBuf,

    /// Extracted text content
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            content: content.into(),
        }
    }

    /// File name for citation purposes
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A chunk of document content prepared for indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Parent document ID
    pub document_id: Uuid,

    /// Chunk index within the document
    pub chunk_index: u32,

    /// Text content
    pub content: String,

    /// Source file name
    pub source: String,
}

impl DocumentChunk {
    /// Create a new chunk
    pub fn new(
        document_id: Uuid,
        chunk_index: u32,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            document_id,
            chunk_index,
            content: content.into(),
            source: source.into(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for LLM chat clients
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a response for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Trait for embedding generation
#[async_trait::async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch)
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

// ============================================================================
// Tests
// ============================================================================
