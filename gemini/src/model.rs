use anyhow::Context as _;
use finsight_core::{CompletionModel, Embedding, EmbeddingModel};

use crate::{
    client::{call_generate, embed_content},
    config::GeminiBackend,
    types::{EmbedContentRequest, GeminiContent, GenerateContentRequest},
};

impl EmbeddingModel for GeminiBackend {
    fn dim(&self) -> usize {
        self.config().embedding_dimensions
    }

    async fn embed(&self, text: &str) -> finsight_core::Result<Embedding> {
        let cfg = self.config();
        let request =
            EmbedContentRequest::new(&cfg.embedding_model, GeminiContent::text("user", text));
        let response = embed_content(self, request)
            .await
            .context("embedContent request failed")?;
        let values = response.embedding.values;
        anyhow::ensure!(
            values.len() == cfg.embedding_dimensions,
            "embedding dimension mismatch: expected {}, got {}",
            cfg.embedding_dimensions,
            values.len()
        );
        Ok(values)
    }
}

impl CompletionModel for GeminiBackend {
    async fn complete(
        &self,
        context: &str,
        question: &str,
        temperature: f32,
    ) -> finsight_core::Result {
        let prompt = stuff_prompt(context, question);
        let response = call_generate(self, GenerateContentRequest::text(prompt, temperature))
            .await
            .context("generateContent request failed")?;

        let answer = response
            .primary_candidate()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.text_chunks().join(""))
            .filter(|text| !text.is_empty());

        match answer {
            Some(text) => Ok(text),
            // No identifiable text part: hand back the payload itself.
            None => Ok(serde_json::to_string(&response)?),
        }
    }
}

fn stuff_prompt(context: &str, question: &str) -> String {
    format!(
        "Use the following context to answer the question. \
         If the context does not contain the answer, say so.\n\n\
         Context:\n{context}\n\nQuestion: {question}"
    )
}
