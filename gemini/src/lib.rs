//! Google Gemini backend for the FinSight model traits.
//!
//! [`GeminiBackend`] implements both [`finsight_core::EmbeddingModel`]
//! (via the `embedContent` endpoint) and
//! [`finsight_core::CompletionModel`] (via `generateContent`), so a single
//! configured backend drives the whole pipeline. Authentication uses the
//! `GEMINI_API_KEY` credential attached as a query parameter; the base URL
//! can be overridden for proxies and tests.

mod client;
mod config;
mod error;
mod model;
mod types;

pub use config::{
    DEFAULT_EMBEDDING_DIMENSIONS, DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL, GEMINI_API_BASE_URL,
    GeminiBackend,
};
pub use error::GeminiError;
