//! URL fetching and text extraction for the FinSight ingestion pipeline.
//!
//! The [`ContentLoader`] trait is the seam between the pipeline and the
//! network: production code uses [`HttpLoader`] (reqwest + scraper), tests
//! substitute in-memory fakes. A loader resolves one URL to one
//! [`FetchedPage`]; batch semantics (blank filtering, abort-on-failure)
//! belong to the ingest pipeline, not here.

mod extract;

use std::time::Duration;

use core::future::Future;
use thiserror::Error;

pub use extract::extract_text;

const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; finsight/0.1; +https://github.com/finsight/finsight)";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// A fetched document, reduced to readable text.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was fetched.
    pub url: String,
    /// The page title, if one was found.
    pub title: Option<String>,
    /// Extracted plain text, paragraph-separated.
    pub text: String,
}

/// Errors raised while loading a single URL.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The URL could not be parsed.
    #[error("invalid URL `{url}`: {source}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Parse failure detail.
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Http {
        /// The URL being fetched.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// The URL being fetched.
        url: String,
        /// The response status code.
        status: u16,
    },
    /// The response yielded no readable text.
    #[error("no readable text extracted from {url}")]
    EmptyContent {
        /// The URL being fetched.
        url: String,
    },
}

/// Resolves one URL to readable text.
pub trait ContentLoader: Send + Sync {
    /// Fetches `url` and extracts its text content.
    fn load(&self, url: &str) -> impl Future<Output = Result<FetchedPage, LoadError>> + Send;
}

/// Production loader: HTTP GET with a browser-ish user agent, then
/// HTML-to-text extraction.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: reqwest::Client,
}

impl HttpLoader {
    /// Creates a loader with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Client`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new() -> Result<Self, LoadError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a loader with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Client`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(LoadError::Client)?;
        Ok(Self { client })
    }
}

impl ContentLoader for HttpLoader {
    async fn load(&self, url: &str) -> Result<FetchedPage, LoadError> {
        let parsed = url::Url::parse(url).map_err(|source| LoadError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| LoadError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_none_or(|value| value.contains("html"));

        let body = response.text().await.map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?;

        let (title, text) = if is_html {
            extract_text(&body)
        } else {
            (None, body.trim().to_string())
        };

        if text.is_empty() {
            return Err(LoadError::EmptyContent {
                url: url.to_string(),
            });
        }

        tracing::debug!(url, chars = text.chars().count(), "fetched page");
        Ok(FetchedPage {
            url: url.to_string(),
            title,
            text,
        })
    }
}
