use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    config::{GeminiBackend, USER_AGENT},
    error::{GeminiError, api_error},
    types::{
        EmbedContentRequest, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse,
    },
};

pub(crate) async fn call_generate(
    backend: &GeminiBackend,
    request: GenerateContentRequest,
) -> Result<GenerateContentResponse, GeminiError> {
    let cfg = backend.config();
    let endpoint = cfg.model_endpoint(&cfg.text_model, "generateContent");
    post_json(backend, endpoint, &request).await
}

pub(crate) async fn embed_content(
    backend: &GeminiBackend,
    request: EmbedContentRequest,
) -> Result<EmbedContentResponse, GeminiError> {
    let cfg = backend.config();
    let endpoint = cfg.model_endpoint(&cfg.embedding_model, "embedContent");
    post_json(backend, endpoint, &request).await
}

async fn post_json<T: DeserializeOwned, S: Serialize>(
    backend: &GeminiBackend,
    endpoint: String,
    body: &S,
) -> Result<T, GeminiError> {
    tracing::debug!(endpoint = redact_key(&endpoint), "calling Gemini");
    let response = backend
        .client()
        .post(&endpoint)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(api_error(status.as_u16(), &body));
    }
    Ok(response.json().await?)
}

/// Strips the key query parameter so endpoints can be logged.
fn redact_key(endpoint: &str) -> &str {
    endpoint.split("?key=").next().unwrap_or(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacted_endpoint_drops_credential() {
        let url = "http://host/models/m:generateContent?key=secret";
        assert_eq!(redact_key(url), "http://host/models/m:generateContent");
    }
}
