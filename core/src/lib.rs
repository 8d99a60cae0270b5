//! Trait abstractions shared by every FinSight provider crate.
//!
//! The pipeline only ever talks to models through two seams: an
//! [`EmbeddingModel`] that turns text into fixed-dimension vectors, and a
//! [`CompletionModel`] that answers a question grounded in retrieved context.
//! Provider crates (such as `finsight-gemini`) implement both; the rest of
//! the workspace stays provider-agnostic.

pub mod completion;
pub mod embedding;

pub use completion::CompletionModel;
pub use embedding::{Embedding, EmbeddingModel};

/// Result type used across model trait boundaries.
///
/// Provider failures are opaque to callers, so the traits return
/// [`anyhow::Error`]; operation-level crates wrap these into their own typed
/// errors at the call site.
pub type Result<T = String> = anyhow::Result<T>;
