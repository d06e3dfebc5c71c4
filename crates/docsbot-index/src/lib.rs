//! Docsbot Index - Document index construction and query engine
//!
//! Builds an in-memory vector index from a directory of documents and
//! answers questions against it:
//! - Directory scan and chunking
//! - Embedding generation (provider API)
//! - Cosine-similarity retrieval
//! - Answer synthesis via the chat model

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use docsbot_core::{BotError, DocumentChunk, EmbeddingClient, IndexConfig, LlmClient, Result};

pub mod embedding;
pub mod llm;
pub mod loader;

pub use embedding::ApiEmbedding;
pub use llm::DeepSeekClient;
pub use loader::{chunk_document, load_documents};

/// Answer returned when no index is loaded
pub const INDEX_UNAVAILABLE_MESSAGE: &str =
    "Error: Chatbot index is not available. Please try again later.";

/// Answer returned when query execution fails
pub const QUERY_FAILED_MESSAGE: &str = "Error: Could not generate a response.";

/// Number of chunks sent per embedding request
const EMBED_BATCH_SIZE: usize = 32;

// ============================================================================
// Vector Index
// ============================================================================

/// A chunk stored in the index together with its embedding
#[derive(Debug, Clone)]
pub struct IndexedChunk {
    /// The chunk content and provenance
    pub chunk: DocumentChunk,

    /// Embedding vector
    pub embedding: Vec<f32>,
}

/// In-memory vector index over document chunks
///
/// Immutable once built; rebuilds replace the whole index.
#[derive(Debug, Default)]
pub struct VectorIndex {
    chunks: Vec<IndexedChunk>,
}

impl VectorIndex {
    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Retrieve the top-k chunks most similar to a query embedding
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<(&DocumentChunk, f32)> {
        let mut scored: Vec<_> = self
            .chunks
            .iter()
            .map(|c| (&c.chunk, cosine_similarity(query_embedding, &c.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}

/// Cosine similarity between two vectors
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Build a vector index from all documents under a directory
///
/// Fails when the directory yields no documents or embedding fails.
pub async fn build_index(
    dir: &Path,
    config: &IndexConfig,
    embedder: &dyn EmbeddingClient,
) -> Result<VectorIndex> {
    let start = Instant::now();
    tracing::info!("Constructing index from directory: {}", dir.display());

    let documents = loader::load_documents(dir)?;

    let mut chunks = Vec::new();
    for doc in &documents {
        chunks.extend(loader::chunk_document(doc, config));
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let mut embeddings = Vec::with_capacity(texts.len());
    for batch in texts.chunks(EMBED_BATCH_SIZE) {
        embeddings.extend(embedder.embed_batch(batch).await?);
    }

    if embeddings.len() != chunks.len() {
        return Err(BotError::Embedding(format!(
            "Expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        )));
    }

    let indexed = chunks
        .into_iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| IndexedChunk { chunk, embedding })
        .collect::<Vec<_>>();

    tracing::info!(
        "Index constructed: {} documents, {} chunks in {:?}",
        documents.len(),
        indexed.len(),
        start.elapsed()
    );

    Ok(VectorIndex { chunks: indexed })
}

// ============================================================================
// Query Engine
// ============================================================================

/// Answers questions against a vector index using the chat model
pub struct QueryEngine {
    index: Arc<VectorIndex>,
    llm: Arc<dyn LlmClient>,
    embedder: Arc<dyn EmbeddingClient>,
    config: IndexConfig,
}

impl QueryEngine {
    /// Create a query engine over an index
    pub fn new(
        index: Arc<VectorIndex>,
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn EmbeddingClient>,
        config: IndexConfig,
    ) -> Self {
        Self {
            index,
            llm,
            embedder,
            config,
        }
    }

    /// Answer a question using retrieval plus generation
    pub async fn answer(&self, question: &str) -> Result<String> {
        let start = Instant::now();

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.index.search(&query_embedding, self.config.top_k);
        tracing::debug!("Retrieved {} chunks for question", results.len());

        let prompt = build_prompt(question, &results, self.config.max_context_length);
        tracing::debug!("Calling LLM with prompt length: {} chars", prompt.len());

        let answer = self.llm.generate(&prompt).await?;
        tracing::info!(
            "Answer generated: {} chars in {:?}",
            answer.len(),
            start.elapsed()
        );

        Ok(answer)
    }
}

/// Build the LLM prompt with retrieved context
fn build_prompt(question: &str, results: &[(&DocumentChunk, f32)], max_context: usize) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a helpful assistant answering questions about a document collection.\n\
         Use only the provided context to answer. If the context does not contain\n\
         the answer, say that you could not find the information.\n\n",
    );

    prompt.push_str("Context:\n");
    let mut total_length = 0;
    for (i, (chunk, _score)) in results.iter().enumerate() {
        if total_length + chunk.content.len() > max_context {
            break;
        }

        prompt.push_str(&format!("[{}] (from {})\n", i + 1, chunk.source));
        prompt.push_str(&chunk.content);
        prompt.push_str("\n\n");

        total_length += chunk.content.len();
    }

    prompt.push_str("Question:\n");
    prompt.push_str(question);
    prompt.push('\n');

    prompt
}

// ============================================================================
// Tests
// ============================================================================
