//! Text-to-vector abstraction.
//!
//! An embedding model maps text to a dense vector such that semantically
//! close texts land close together. FinSight uses one embedding model for
//! both sides of retrieval: every chunk at ingest time, and the query at
//! question time. Mixing vectors from models with different dimensions is
//! never valid, which is why [`EmbeddingModel::dim`] is part of the contract.

use core::future::Future;

/// A dense vector representation of a piece of text.
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// # Implementation Requirements
///
/// - [`embed`](EmbeddingModel::embed) must return vectors with length equal
///   to [`dim`](EmbeddingModel::dim)
/// - The same input text must map to the same vector within one model
///   instance, so that a chunk indexed yesterday is still retrievable today
pub trait EmbeddingModel: Send + Sync {
    /// Returns the embedding vector dimension.
    fn dim(&self) -> usize;

    /// Converts text to an embedding vector of length [`Self::dim`].
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Embedding>> + Send;
}
