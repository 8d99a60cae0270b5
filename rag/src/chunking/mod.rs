//! Text chunking for the research pipeline.
//!
//! This module provides the [`Chunker`] trait and the
//! [`RecursiveChunker`] implementation used by the ingest pipeline.

mod recursive;

pub use recursive::RecursiveChunker;

use crate::types::{Chunk, Document};

/// Trait for text chunking strategies.
///
/// Chunkers split documents into smaller pieces that can be individually
/// embedded and retrieved. Chunking must be deterministic: the same document
/// always yields the same chunks in the same order.
pub trait Chunker: Send + Sync {
    /// Splits a document into chunks.
    fn chunk(&self, doc: &Document) -> Vec<Chunk>;

    /// Returns the name of this chunking strategy.
    fn name(&self) -> &'static str;
}
