//! Core types for the research pipeline.

use serde::{Deserialize, Serialize};

/// A fetched document awaiting chunking. Never persisted.
#[derive(Clone, Debug)]
pub struct Document {
    /// Source URL the text came from.
    pub url: String,
    /// Raw text content.
    pub text: String,
}

impl Document {
    /// Creates a new document.
    #[must_use]
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// A chunk of text derived from a document.
///
/// Chunks are immutable once created; consecutive chunks of the same
/// document overlap by the chunker's configured amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of the chunk.
    pub text: String,
    /// URL of the parent document.
    pub source_url: String,
    /// Position of this chunk within the document.
    pub index: usize,
}

impl Chunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(text: impl Into<String>, source_url: impl Into<String>, index: usize) -> Self {
        Self {
            text: text.into(),
            source_url: source_url.into(),
            index,
        }
    }
}

/// Entry stored in the index: one chunk paired with its embedding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexEntry {
    /// The chunk.
    pub chunk: Chunk,
    /// The embedding vector.
    pub embedding: Vec<f32>,
}

impl IndexEntry {
    /// Creates a new index entry.
    #[must_use]
    pub const fn new(chunk: Chunk, embedding: Vec<f32>) -> Self {
        Self { chunk, embedding }
    }
}

/// A search result containing a chunk and its similarity score.
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    /// The matching chunk.
    pub chunk: Chunk,
    /// Cosine similarity against the query (higher is better).
    pub score: f32,
}

/// A generated answer together with the chunks that grounded it.
#[derive(Clone, Debug, Serialize)]
pub struct Answer {
    /// The question that was asked.
    pub query: String,
    /// The generated answer text.
    pub text: String,
    /// Retrieved chunks in rank order, as stuffed into the prompt.
    pub sources: Vec<SearchResult>,
}

/// Summary of a completed ingest run.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct IngestReport {
    /// Number of documents fetched.
    pub documents: usize,
    /// Number of chunks embedded and indexed.
    pub chunks: usize,
}
