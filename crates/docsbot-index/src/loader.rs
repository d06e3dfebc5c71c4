//! Directory loader and chunker
//!
//! Scans a local directory for text-like files and splits their
//! content into overlapping chunks sized for embedding.

use std::path::Path;

use docsbot_core::{BotError, Document, DocumentChunk, IndexConfig, Result};
use walkdir::WalkDir;

/// File extensions the loader will read as plain text
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "html", "htm", "csv", "json", "log"];

/// Check whether a path has a supported extension
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Load all readable documents under a directory
///
/// Fails with `BotError::EmptyDirectory` when the scan yields no documents
/// and with `BotError::Io` when a supported file cannot be read. Files that
/// cannot be decoded as UTF-8 are skipped with a warning.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_supported(path) {
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => {
                documents.push(Document::new(path, content));
            }
            Ok(_) => {
                tracing::debug!("Skipping empty file: {}", path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping non-text file {}: {e}", path.display());
            }
            Err(e) => {
                return Err(BotError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        }
    }

    if documents.is_empty() {
        return Err(BotError::EmptyDirectory(dir.display().to_string()));
    }

    tracing::info!("Loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}

/// Split a document into overlapping chunks
pub fn chunk_document(doc: &Document, config: &IndexConfig) -> Vec<DocumentChunk> {
    let source = doc.file_name();
    let text = doc.content.as_str();
    let mut chunks = Vec::new();
    let mut index = 0u32;

    if text.len() <= config.chunk_size {
        chunks.push(DocumentChunk::new(doc.id, 0, text, source));
        return chunks;
    }

    let mut start = 0;
    while start < text.len() {
        let target = floor_char_boundary(text, start + config.chunk_size);
        let mut end = if target >= text.len() {
            text.len()
        } else {
            find_break_point(text, target)
        };
        // The break-point search can land before the chunk start on
        // pathological input; fall back to the raw target
        if end <= start {
            end = target;
        }

        let content = text[start..end].trim();
        if !content.is_empty() {
            chunks.push(DocumentChunk::new(doc.id, index, content, source.clone()));
            index += 1;
        }

        if end >= text.len() {
            break;
        }

        // Step back by the overlap, but always make forward progress
        let next = floor_char_boundary(text, end.saturating_sub(config.chunk_overlap));
        start = if next > start { next } else { end };
    }

    chunks
}

/// Round an offset down to the nearest char boundary
fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Find a break point near the target position
///
/// Prefers paragraph breaks, then sentence ends, then line breaks.
fn find_break_point(text: &str, target: usize) -> usize {
    let search_start = floor_char_boundary(text, target.saturating_sub(100));
    let search_end = floor_char_boundary(text, (target + 100).min(text.len()));
    let window = &text[search_start..search_end];

    if let Some(pos) = window.rfind("\n\n") {
        return search_start + pos + 2;
    }

    for pattern in [". ", "。", "! ", "? "] {
        if let Some(pos) = window.rfind(pattern) {
            return search_start + pos + pattern.len();
        }
    }

    if let Some(pos) = window.rfind('\n') {
        return search_start + pos + 1;
    }

    floor_char_boundary(text, target)
}
