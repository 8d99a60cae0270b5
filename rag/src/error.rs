//! Error taxonomy for the research pipeline.
//!
//! Each pipeline operation surfaces exactly one error enum: [`IngestError`]
//! for `ingest`, [`QueryError`] for `ask`, with [`StoreError`] and
//! [`IndexError`] nested where persistence or the vector index is the actual
//! source. Provider failures arrive as opaque [`anyhow::Error`] values from
//! the `finsight-core` traits and are wrapped, never retried.

use std::path::PathBuf;

use thiserror::Error;

/// One URL that could not be fetched, with the reason.
#[derive(Clone, Debug)]
pub struct FetchFailure {
    /// The URL as given by the caller.
    pub url: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Errors raised by `ingest`.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Every provided URL was blank.
    #[error("no URLs were provided; enter at least one URL to ingest")]
    NoInput,
    /// More URLs than the configured batch limit.
    #[error("too many URLs: at most {limit} may be ingested at once")]
    TooManyUrls {
        /// Configured batch limit.
        limit: usize,
    },
    /// One or more URLs could not be fetched; the whole batch is aborted.
    #[error("failed to fetch {}", format_failures(.failures))]
    Fetch {
        /// Every URL that failed, in input order.
        failures: Vec<FetchFailure>,
    },
    /// The embedding provider failed for some chunk.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),
    /// A produced vector could not be added to the index.
    #[error("index build failed: {0}")]
    IndexBuild(#[from] IndexError),
    /// The completed index could not be persisted.
    #[error("failed to persist index: {0}")]
    Store(#[from] StoreError),
}

/// Errors raised by `ask`.
///
/// A missing index is deliberately *not* represented here; that case is the
/// `NotReady` outcome, not a failure.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The embedding provider failed for the query text.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),
    /// The persisted index exists but could not be loaded.
    #[error("could not load index: {0}")]
    IndexLoad(#[from] StoreError),
    /// Retrieval over the loaded index failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] IndexError),
    /// The completion provider failed.
    #[error("answer generation failed: {0}")]
    Generation(#[source] anyhow::Error),
}

/// Errors raised by the in-memory vector index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index holds no entries.
    #[error("the index is empty")]
    Empty,
    /// A vector's length does not match the index dimension.
    #[error("vector dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch {
        /// Dimension the index was created with.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },
}

/// Errors raised by the index store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No index file exists at the configured path.
    #[error("no index found at {}", .path.display())]
    NotFound {
        /// Configured index path.
        path: PathBuf,
    },
    /// Filesystem failure while reading or writing the index.
    #[error("index I/O failed at {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file exists but does not parse as an index envelope.
    #[error("index at {} is not valid: {reason}", .path.display())]
    Corrupt {
        /// Path of the invalid file.
        path: PathBuf,
        /// Validation failure detail.
        reason: String,
    },
    /// The envelope parsed but declares a format or version this build
    /// does not understand.
    #[error("index at {} has unsupported format `{format}` version {version}", .path.display())]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: PathBuf,
        /// Declared format tag.
        format: String,
        /// Declared version.
        version: u32,
    },
    /// An entry's embedding length disagrees with the declared dimension.
    #[error("index entry {index} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        /// Position of the offending entry.
        index: usize,
        /// Dimension declared in the envelope.
        expected: usize,
        /// Dimension actually found.
        actual: usize,
    },
}

fn format_failures(failures: &[FetchFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{} ({})", failure.url, failure.reason))
        .collect::<Vec<_>>()
        .join(", ")
}
