//! In-memory brute-force vector index.
//!
//! The corpus is a handful of articles, so retrieval is an exact scan:
//! every entry is scored against the query with cosine similarity and the
//! top `k` are returned. Exact scanning also gives a guarantee approximate
//! structures cannot: equal scores resolve by insertion order, every time.

use crate::error::IndexError;
use crate::types::{Chunk, IndexEntry, SearchResult};

/// Brute-force cosine index over all entries.
///
/// Built fresh on every ingest and read-only afterwards. The dimension is
/// fixed at construction; every inserted vector must match it.
#[derive(Clone, Debug)]
pub struct VectorIndex {
    dimension: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Creates an empty index for vectors of the given dimension.
    #[must_use]
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Rebuilds an index from persisted entries, validating every vector
    /// against `dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] for the first entry whose
    /// embedding length disagrees.
    pub fn from_entries(
        dimension: usize,
        entries: Vec<IndexEntry>,
    ) -> Result<Self, IndexError> {
        for entry in &entries {
            if entry.embedding.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: entry.embedding.len(),
                });
            }
        }
        Ok(Self { dimension, entries })
    }

    /// Appends a chunk and its embedding.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::DimensionMismatch`] when the vector length does
    /// not match the index dimension.
    pub fn push(&mut self, chunk: Chunk, embedding: Vec<f32>) -> Result<(), IndexError> {
        if embedding.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        self.entries.push(IndexEntry::new(chunk, embedding));
        Ok(())
    }

    /// Returns the `k` entries most similar to `query`, best first.
    ///
    /// Scores every entry; ties keep insertion order (the sort is stable).
    /// Returns all entries when the index holds fewer than `k`.
    ///
    /// # Errors
    ///
    /// [`IndexError::Empty`] when there is nothing to search,
    /// [`IndexError::DimensionMismatch`] when the query length is wrong.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>, IndexError> {
        if self.entries.is_empty() {
            return Err(IndexError::Empty);
        }
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (position, cosine_similarity(query, &entry.embedding)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(position, score)| SearchResult {
                chunk: self.entries[position].chunk.clone(),
                score,
            })
            .collect())
    }

    /// Returns the entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the vector dimension.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Consumes the index, yielding the entries in insertion order.
    #[must_use]
    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }
}

/// Cosine similarity between two vectors of equal length.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
