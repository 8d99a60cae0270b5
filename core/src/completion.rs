//! Grounded text completion abstraction.
//!
//! FinSight asks one thing of a language model: given a block of retrieved
//! context and a user question, produce an answer. The trait is deliberately
//! narrower than a general chat interface — there is no history, no tool
//! calling, no streaming — because the QA pipeline stuffs everything the
//! model needs into a single request.

use core::future::Future;

/// Answers a question using the supplied context.
///
/// # Implementation Requirements
///
/// - The answer must be derived from `context` where possible; providers
///   decide how to phrase the prompt that enforces this
/// - `temperature` is forwarded to the underlying model unchanged
pub trait CompletionModel: Send + Sync {
    /// Produces an answer to `question` grounded in `context`.
    fn complete(
        &self,
        context: &str,
        question: &str,
        temperature: f32,
    ) -> impl Future<Output = crate::Result> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockCompletionModel;

    impl CompletionModel for MockCompletionModel {
        async fn complete(
            &self,
            context: &str,
            question: &str,
            temperature: f32,
        ) -> crate::Result {
            Ok(format!("ctx={} q={question} t={temperature}", context.len()))
        }
    }

    #[tokio::test]
    async fn completion_receives_all_inputs() {
        let model = MockCompletionModel;
        let answer = model.complete("some context", "why?", 0.9).await.unwrap();
        assert_eq!(answer, "ctx=12 q=why? t=0.9");
    }
}
