//! Retrieval-augmented research over a handful of URLs.
//!
//! The pipeline has two operations, both on [`ResearchEngine`]:
//!
//! - [`ResearchEngine::ingest`] fetches up to a few URLs, cleans and chunks
//!   their text, embeds every chunk, and atomically replaces a persisted
//!   vector index.
//! - [`ResearchEngine::ask`] embeds a question, retrieves the closest
//!   chunks from the persisted index, and has a completion model answer
//!   from that context.
//!
//! Model access goes through the `finsight-core` traits, URL fetching
//! through `finsight-loader`, so the whole pipeline runs against in-memory
//! fakes in tests.

pub mod chunking;
pub mod cleaning;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod store;
pub mod types;

pub use chunking::{Chunker, RecursiveChunker};
pub use cleaning::{BasicCleaner, Cleaner};
pub use config::{RagConfig, RagConfigBuilder};
pub use engine::{AskOutcome, ResearchEngine};
pub use error::{FetchFailure, IndexError, IngestError, QueryError, StoreError};
pub use index::VectorIndex;
pub use store::IndexStore;
pub use types::{Answer, Chunk, Document, IndexEntry, IngestReport, SearchResult};
