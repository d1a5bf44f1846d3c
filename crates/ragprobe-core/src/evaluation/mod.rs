//! Evaluation of a RAG pipeline against generated test questions.
//!
//! Each test question is scored twice:
//!
//! | Stage | Component | Output |
//! |-------|-----------|--------|
//! | Retrieval | [`metrics`] over the retriever's ranked chunks | MRR, NDCG, keyword coverage |
//! | Answer | [`AnswerJudge`] over the responder's answer | accuracy, completeness, relevance (1-5) |
//!
//! The [`Evaluator`] runs both stages for every question, skips questions
//! whose retrieval, answer or judging step fails, and averages the rest into
//! an [`EvaluationSummary`].
//!
//! # Example
//!
//! ```ignore
//! use ragprobe_core::evaluation::{EvaluationConfig, Evaluator};
//!
//! let evaluator = Evaluator::new(retriever, responder, judge_llm, EvaluationConfig::default());
//! let report = evaluator.evaluate(&tests, |p| println!("{}/{}", p.completed, p.total)).await?;
//! println!("MRR: {:.3}", report.summary.mean_mrr);
//! ```

mod evaluator;
mod judge;
pub mod metrics;

pub use evaluator::{
    EvaluationProgress, EvaluationReport, EvaluationSummary, Evaluator, MetricTotals,
    QuestionOutcome, QuestionResult,
};
pub use judge::AnswerJudge;
pub use metrics::{evaluate_retrieval, keyword_ndcg_at_k, keyword_reciprocal_rank};

use crate::config::DEFAULT_TOP_K;
use crate::error::ConfigError;

/// Settings for an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationConfig {
    /// Chunks requested from the retriever per question
    pub top_k: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        Ok(())
    }
}
