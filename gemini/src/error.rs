use serde::Deserialize;
use thiserror::Error;

/// Errors raised by the Gemini backend.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Neither `GEMINI_API_KEY` nor `GOOGLE_API_KEY` is set.
    #[error("missing API key: set GEMINI_API_KEY (or GOOGLE_API_KEY) in the environment")]
    MissingApiKey,
    /// HTTP transport errors.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success status with the message extracted from the API error body.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Human-readable message from the error payload, or a status-based fallback.
        message: String,
    },
    /// JSON serialization/deserialization problems.
    #[error("invalid response format: {0}")]
    Json(#[from] serde_json::Error),
    /// The response carried no usable payload (e.g. no candidates).
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// Gemini API error response structure.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ApiErrorResponse {
    /// Extract a user-friendly message from the error response.
    pub fn friendly_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        error.message.clone().or_else(|| error.status.clone())
    }
}

/// Build a [`GeminiError::Api`] from a non-success status and its raw body.
pub(crate) fn api_error(status: u16, body: &str) -> GeminiError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.friendly_message())
        .unwrap_or_else(|| fallback_message(status));
    GeminiError::Api { status, message }
}

fn fallback_message(status: u16) -> String {
    match status {
        400 => "invalid request".to_string(),
        401 => "authentication failed - check your API key".to_string(),
        403 => "access denied - check your API key permissions".to_string(),
        404 => "model not found".to_string(),
        429 => "rate limit exceeded".to_string(),
        500 => "server error".to_string(),
        502..=504 => "service temporarily unavailable".to_string(),
        _ => format!("HTTP error {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_body_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let err = api_error(400, body);
        assert_eq!(
            err.to_string(),
            "Gemini API error (HTTP 400): API key not valid"
        );
    }

    #[test]
    fn api_error_falls_back_on_unparseable_body() {
        let err = api_error(503, "<html>gateway</html>");
        assert_eq!(
            err.to_string(),
            "Gemini API error (HTTP 503): service temporarily unavailable"
        );
    }

    #[test]
    fn api_error_uses_status_field_when_message_absent() {
        let body = r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#;
        let err = api_error(429, body);
        assert_eq!(
            err.to_string(),
            "Gemini API error (HTTP 429): RESOURCE_EXHAUSTED"
        );
    }
}
