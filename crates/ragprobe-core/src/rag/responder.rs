//! Retrieval-augmented answer generation.

use super::{Responder, Retriever};
use crate::config::DEFAULT_TOP_K;
use crate::error::RespondError;
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// System prompt used when no template is configured. `{context}` is
/// replaced with the retrieved chunks.
pub const DEFAULT_SYSTEM_PROMPT_TEMPLATE: &str = "You are a helpful assistant. Answer questions based on the provided context.
If you don't know the answer, say so.

Context:
{context}";

const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Answers questions by stuffing retrieved chunks into the system prompt.
pub struct LlmResponder {
    retriever: Arc<dyn Retriever>,
    client: Arc<dyn LlmClient>,
    template: String,
    top_k: usize,
}

impl LlmResponder {
    pub fn new(retriever: Arc<dyn Retriever>, client: Arc<dyn LlmClient>) -> Self {
        Self {
            retriever,
            client,
            template: DEFAULT_SYSTEM_PROMPT_TEMPLATE.to_string(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Replaces the system prompt template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    fn system_prompt(&self, context: &str) -> String {
        self.template.replace("{context}", context)
    }
}

#[async_trait]
impl Responder for LlmResponder {
    async fn respond(
        &self,
        messages: &[ChatMessage],
        query: &str,
    ) -> Result<String, RespondError> {
        let chunks = self.retriever.query(query, self.top_k).await?;
        let context = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);
        debug!("Answering with {} context chunks", chunks.len());

        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(self.system_prompt(&context)));
        all.extend_from_slice(messages);

        let request = CompletionRequest {
            messages: all,
            ..CompletionRequest::default()
        };
        Ok(self.client.complete(request).await?)
    }
}
