//! LLM-driven question synthesis for a single context window.

use super::grounding;
use super::GenerationConfig;
use crate::error::GenerationError;
use crate::llm::{parse_reply, CompletionRequest, LlmClient};
use crate::types::{Category, TestQuestion};
use crate::windowing::ContextWindow;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a test case generator for a RAG (Retrieval-Augmented Generation) system.
Write high-quality, factual questions that can be answered DIRECTLY from the given text.

Requirements:
- Every question must be answerable ONLY from the text passage
- Never require external knowledge
- Give a complete reference answer taken from the text
- List 2-4 key facts or keywords that a correct answer must contain
- Assign each question one category: direct_fact, temporal, numerical, comparative, relationship

Categories:
- direct_fact: simple facts (Who is X? What is Y?)
- temporal: times and dates (When did X happen?)
- numerical: quantities (How many X?)
- comparative: comparisons between entities (How does X compare to Y?)
- relationship: connections between entities (Who reports to X?)

Prefer diverse, non-trivial questions. Avoid yes/no questions.";

const EXAMPLE_RESPONSE: &str = r#"{
  "questions": [
    {
      "question": "Who is the CEO of Insurellm?",
      "category": "direct_fact",
      "reference_answer": "Avery Lancaster is the Co-Founder and Chief Executive Officer (CEO) of Insurellm.",
      "keywords": ["Avery Lancaster", "CEO", "Co-Founder"]
    }
  ]
}"#;

/// A question exactly as the LLM wrote it, before normalization.
#[derive(Debug, Default, Deserialize)]
struct RawCandidate {
    #[serde(default)]
    question: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    reference_answer: String,
    #[serde(default)]
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratedBatch {
    #[serde(default)]
    questions: Vec<RawCandidate>,
}

/// Prompts the generation LLM for test questions over one window.
pub struct QuestionSynthesizer {
    client: Arc<dyn LlmClient>,
}

impl QuestionSynthesizer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Generates questions for `window` and returns the grounded ones.
    ///
    /// Accepted questions carry a category normalized against
    /// `config.categories` and `expected_sources = {window.source_id}`.
    /// Candidates that fail grounding are dropped silently.
    pub async fn synthesize(
        &self,
        window: &ContextWindow<'_>,
        config: &GenerationConfig,
    ) -> Result<Vec<TestQuestion>, GenerationError> {
        let request = CompletionRequest::prompt(
            SYSTEM_PROMPT,
            user_prompt(window.text, window.source_id, config.questions_per_window),
            config.temperature,
        );

        let response = self.client.complete(request).await?;
        let batch: GeneratedBatch = parse_reply(&response)
            .into_result(|raw, reason| GenerationError::Unparsable { reason, raw })?;

        let offered = batch.questions.len();
        let accepted: Vec<TestQuestion> = batch
            .questions
            .into_iter()
            .map(|raw| into_test_question(raw, window.source_id, &config.categories))
            .filter(|candidate| match grounding::check(window.text, candidate) {
                Ok(()) => true,
                Err(rejection) => {
                    debug!("Rejected \"{}\": {}", candidate.question, rejection);
                    false
                }
            })
            .collect();

        debug!(
            "Window {} of {}: {}/{} candidates accepted",
            window.index,
            window.source_id,
            accepted.len(),
            offered
        );

        Ok(accepted)
    }
}

fn user_prompt(text: &str, source_id: &str, count: usize) -> String {
    format!(
        "Text passage:\n---\n{}\n---\n\nSource: {}\n\nGenerate {} test questions in JSON format:\n{}\n\nRespond with ONLY the JSON object, no other text.",
        text, source_id, count, EXAMPLE_RESPONSE
    )
}

fn into_test_question(raw: RawCandidate, source_id: &str, allowed: &[Category]) -> TestQuestion {
    TestQuestion {
        question: raw.question,
        category: Category::normalize(&raw.category, allowed),
        reference_answer: raw.reference_answer,
        keywords: raw.keywords,
        expected_sources: BTreeSet::from([source_id.to_string()]),
    }
}
