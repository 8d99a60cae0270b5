use serde::{Deserialize, Serialize};

use crate::config::sanitize_model;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub(crate) contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    pub(crate) fn text(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            contents: vec![GeminiContent::text("user", prompt)],
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

impl GeminiContent {
    pub(crate) fn text(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    pub(crate) fn text_chunks(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter_map(|part| part.text.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    pub(crate) fn primary_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct EmbedContentRequest {
    pub(crate) model: String,
    pub(crate) content: GeminiContent,
}

impl EmbedContentRequest {
    pub(crate) fn new(model: &str, content: GeminiContent) -> Self {
        Self {
            model: sanitize_model(model),
            content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EmbedContentResponse {
    pub(crate) embedding: ContentEmbedding,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEmbedding {
    pub(crate) values: Vec<f32>,
}
