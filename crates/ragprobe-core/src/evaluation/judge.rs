//! LLM-as-judge scoring of generated answers.

use crate::config::{JUDGE_TEMPERATURE, MAX_JUDGE_SCORE, MIN_JUDGE_SCORE};
use crate::error::JudgeError;
use crate::llm::{parse_reply, CompletionRequest, LlmClient};
use crate::types::AnswerEval;
use std::sync::Arc;
use tracing::warn;

const SYSTEM_PROMPT: &str = "You are an expert evaluator assessing the quality of answers. \
Evaluate the generated answer by comparing it to the reference answer. \
Only give 5/5 scores for perfect answers. Respond ONLY with valid JSON.";

/// Scores answers on accuracy, completeness and relevance (1 to 5).
pub struct AnswerJudge {
    client: Arc<dyn LlmClient>,
}

impl AnswerJudge {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Asks the judge LLM to grade `generated` against `reference`.
    ///
    /// Scores outside [1, 5] are clamped into range. Blank or malformed
    /// replies are errors; nothing is retried.
    pub async fn judge(
        &self,
        question: &str,
        generated: &str,
        reference: &str,
    ) -> Result<AnswerEval, JudgeError> {
        let request = CompletionRequest::prompt(
            SYSTEM_PROMPT,
            user_prompt(question, generated, reference),
            JUDGE_TEMPERATURE,
        );

        let response = self.client.complete(request).await?;
        if response.trim().is_empty() {
            return Err(JudgeError::EmptyResponse);
        }

        let eval: AnswerEval = parse_reply(&response)
            .into_result(|raw, reason| JudgeError::Unparsable { reason, raw })?;

        Ok(clamp_scores(eval))
    }
}

fn user_prompt(question: &str, generated: &str, reference: &str) -> String {
    format!(
        r#"Question:
{question}

Generated Answer:
{generated}

Reference Answer:
{reference}

Evaluate the generated answer on three dimensions:
1. Accuracy: How factually correct is it compared to the reference answer? Only give 5/5 scores for perfect answers.
2. Completeness: How thoroughly does it address all aspects of the question, covering all the information from the reference answer?
3. Relevance: How well does it directly answer the specific question asked, giving no additional information?

Respond with ONLY valid JSON in this format:
{{
  "feedback": "detailed feedback here",
  "accuracy": 5.0,
  "completeness": 5.0,
  "relevance": 5.0
}}

If the answer is wrong, accuracy must be 1."#
    )
}

fn clamp_scores(mut eval: AnswerEval) -> AnswerEval {
    for (name, score) in [
        ("accuracy", &mut eval.accuracy),
        ("completeness", &mut eval.completeness),
        ("relevance", &mut eval.relevance),
    ] {
        let clamped = (*score).clamp(MIN_JUDGE_SCORE, MAX_JUDGE_SCORE);
        if clamped != *score {
            warn!("Judge {} score {} out of range, clamped to {}", name, score, clamped);
            *score = clamped;
        }
    }
    eval
}
