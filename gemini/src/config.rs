use std::sync::Arc;

use crate::error::GeminiError;

/// Gemini REST base URL used by the Developer API.
pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub(crate) const USER_AGENT: &str = "finsight-gemini/0.1";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";
/// Vector dimension produced by [`DEFAULT_EMBEDDING_MODEL`].
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;

/// Environment variables consulted by [`GeminiBackend::from_env`], in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Native Gemini backend wired up to the `finsight-core` traits.
#[derive(Clone, Debug)]
pub struct GeminiBackend {
    inner: Arc<GeminiConfig>,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend using the default generation/embedding models.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GeminiConfig {
                api_key: api_key.into(),
                base_url: GEMINI_API_BASE_URL.to_string(),
                text_model: sanitize_model(DEFAULT_MODEL),
                embedding_model: sanitize_model(DEFAULT_EMBEDDING_MODEL),
                embedding_dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            }),
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend from the process environment.
    ///
    /// Reads `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`. This is the
    /// single credential the pipeline needs, and it is checked here, before
    /// any request is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] when neither variable holds a
    /// non-empty value.
    pub fn from_env() -> Result<Self, GeminiError> {
        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    return Ok(Self::new(key));
                }
            }
        }
        Err(GeminiError::MissingApiKey)
    }

    /// Override the REST base URL (useful for sandboxes or proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).base_url = base_url.into();
        self
    }

    /// Override the default generation model.
    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).text_model = sanitize_model(model);
        self
    }

    /// Override the embedding model and its dimensionality.
    #[must_use]
    pub fn with_embedding_model(mut self, model: impl Into<String>, dim: usize) -> Self {
        let cfg = Arc::make_mut(&mut self.inner);
        cfg.embedding_model = sanitize_model(model);
        cfg.embedding_dimensions = dim;
        self
    }

    pub(crate) fn config(&self) -> &GeminiConfig {
        &self.inner
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GeminiConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) text_model: String,
    pub(crate) embedding_model: String,
    pub(crate) embedding_dimensions: usize,
}

impl GeminiConfig {
    pub(crate) fn endpoint(&self, suffix: &str) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        );
        let separator = if url.contains('?') { '&' } else { '?' };
        url.push(separator);
        url.push_str("key=");
        url.push_str(&self.api_key);
        url
    }

    pub(crate) fn model_endpoint(&self, model: &str, action: &str) -> String {
        let model = sanitize_model(model);
        self.endpoint(&format!("{model}:{action}"))
    }
}

pub(crate) fn sanitize_model(model: impl Into<String>) -> String {
    let model = model.into();
    if model.starts_with("models/") {
        model
    } else {
        format!("models/{model}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_key_as_query() {
        let backend = GeminiBackend::new("secret");
        let url = backend.config().endpoint("models/embedding-001:embedContent");
        assert_eq!(
            url,
            format!("{GEMINI_API_BASE_URL}/models/embedding-001:embedContent?key=secret")
        );
    }

    #[test]
    fn model_endpoint_prefixes_bare_model_names() {
        let backend = GeminiBackend::new("k").with_base_url("http://localhost:9999");
        let url = backend
            .config()
            .model_endpoint("gemini-1.5-pro", "generateContent");
        assert_eq!(
            url,
            "http://localhost:9999/models/gemini-1.5-pro:generateContent?key=k"
        );
    }

    #[test]
    fn sanitize_model_is_idempotent() {
        assert_eq!(sanitize_model("models/embedding-001"), "models/embedding-001");
        assert_eq!(sanitize_model("embedding-001"), "models/embedding-001");
    }
}
