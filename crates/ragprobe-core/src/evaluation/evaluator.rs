//! Evaluation orchestrator and summary aggregation.

use super::judge::AnswerJudge;
use super::metrics::evaluate_retrieval;
use super::EvaluationConfig;
use crate::error::{ConfigError, EvaluationError, QuestionFailure};
use crate::llm::{ChatMessage, LlmClient};
use crate::rag::{Responder, Retriever};
use crate::types::{AnswerEval, Category, RetrievalEval, TestQuestion};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Mean scores over the successfully evaluated questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub mean_mrr: f64,
    pub mean_ndcg: f64,
    pub mean_keyword_coverage: f64,
    pub mean_accuracy: f64,
    pub mean_completeness: f64,
    pub mean_relevance: f64,
}

/// Running sums of per-question scores.
///
/// `add` and `merge` are plain field-wise sums, so totals gathered in any
/// order or split across workers combine to the same result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricTotals {
    count: usize,
    mrr: f64,
    ndcg: f64,
    keyword_coverage: f64,
    accuracy: f64,
    completeness: f64,
    relevance: f64,
}

impl MetricTotals {
    pub fn add(&mut self, retrieval: &RetrievalEval, answer: &AnswerEval) {
        self.count += 1;
        self.mrr += retrieval.mrr;
        self.ndcg += retrieval.ndcg;
        self.keyword_coverage += retrieval.keyword_coverage;
        self.accuracy += answer.accuracy;
        self.completeness += answer.completeness;
        self.relevance += answer.relevance;
    }

    pub fn merge(self, other: MetricTotals) -> MetricTotals {
        MetricTotals {
            count: self.count + other.count,
            mrr: self.mrr + other.mrr,
            ndcg: self.ndcg + other.ndcg,
            keyword_coverage: self.keyword_coverage + other.keyword_coverage,
            accuracy: self.accuracy + other.accuracy,
            completeness: self.completeness + other.completeness,
            relevance: self.relevance + other.relevance,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Divides the sums by the success count; `None` if nothing was added.
    pub fn finish(&self, failure_count: usize) -> Option<EvaluationSummary> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(EvaluationSummary {
            success_count: self.count,
            failure_count,
            mean_mrr: self.mrr / n,
            mean_ndcg: self.ndcg / n,
            mean_keyword_coverage: self.keyword_coverage / n,
            mean_accuracy: self.accuracy / n,
            mean_completeness: self.completeness / n,
            mean_relevance: self.relevance / n,
        })
    }
}

/// Result of evaluating one test question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionOutcome {
    pub question: String,
    pub category: Category,
    #[serde(flatten)]
    pub result: QuestionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuestionResult {
    Evaluated {
        retrieval: RetrievalEval,
        answer: AnswerEval,
        generated_answer: String,
    },
    Failed {
        reason: String,
    },
}

/// Summary plus the per-question outcomes it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub summary: EvaluationSummary,
    pub outcomes: Vec<QuestionOutcome>,
}

/// Snapshot emitted after every question, successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationProgress {
    pub completed: usize,
    pub total: usize,
    pub failed: usize,
}

/// Scores a RAG pipeline's retrieval and answers against test questions.
pub struct Evaluator {
    retriever: Arc<dyn Retriever>,
    responder: Arc<dyn Responder>,
    judge: AnswerJudge,
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        responder: Arc<dyn Responder>,
        judge_client: Arc<dyn LlmClient>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            retriever,
            responder,
            judge: AnswerJudge::new(judge_client),
            config,
        }
    }

    /// Evaluates every question in order and aggregates the results.
    ///
    /// A question whose retrieval, answer or judging step fails is recorded as
    /// failed and excluded from the means. Fails only on invalid
    /// configuration, an empty test set, or when no question succeeds.
    #[instrument(skip_all, fields(tests = tests.len(), top_k = self.config.top_k))]
    pub async fn evaluate<F>(
        &self,
        tests: &[TestQuestion],
        mut on_progress: F,
    ) -> Result<EvaluationReport, EvaluationError>
    where
        F: FnMut(&EvaluationProgress),
    {
        self.config.validate()?;
        if tests.is_empty() {
            return Err(ConfigError::NoTestQuestions.into());
        }

        let mut totals = MetricTotals::default();
        let mut outcomes = Vec::with_capacity(tests.len());
        let mut failed = 0;

        for (i, test) in tests.iter().enumerate() {
            let result = match self.evaluate_question(test).await {
                Ok((retrieval, answer, generated_answer)) => {
                    totals.add(&retrieval, &answer);
                    QuestionResult::Evaluated {
                        retrieval,
                        answer,
                        generated_answer,
                    }
                }
                Err(e) => {
                    failed += 1;
                    warn!("Failed to evaluate \"{}\": {}", test.question, e);
                    QuestionResult::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            outcomes.push(QuestionOutcome {
                question: test.question.clone(),
                category: test.category,
                result,
            });
            on_progress(&EvaluationProgress {
                completed: i + 1,
                total: tests.len(),
                failed,
            });
        }

        let summary = totals.finish(failed).ok_or(EvaluationError::AllFailed {
            attempted: tests.len(),
        })?;

        info!(
            "Evaluated {} of {} questions (mrr={:.3}, accuracy={:.2})",
            summary.success_count,
            tests.len(),
            summary.mean_mrr,
            summary.mean_accuracy
        );

        Ok(EvaluationReport { summary, outcomes })
    }

    async fn evaluate_question(
        &self,
        test: &TestQuestion,
    ) -> Result<(RetrievalEval, AnswerEval, String), QuestionFailure> {
        let chunks = self.retriever.query(&test.question, self.config.top_k).await?;
        let retrieval = evaluate_retrieval(&chunks, &test.keywords, self.config.top_k);
        debug!(
            "Retrieved {} chunks: mrr={:.3} ndcg={:.3}",
            chunks.len(),
            retrieval.mrr,
            retrieval.ndcg
        );

        let messages = [ChatMessage::user(test.question.as_str())];
        let generated = self.responder.respond(&messages, &test.question).await?;
        let answer = self
            .judge
            .judge(&test.question, &generated, &test.reference_answer)
            .await?;

        Ok((retrieval, answer, generated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LlmError, RetrievalError};
    use crate::test_utils::{judge_reply, CannedResponder, CannedRetriever, ScriptedLlm};
    use crate::types::Chunk;

    fn question(text: &str, keywords: &[&str]) -> TestQuestion {
        TestQuestion {
            question: text.to_string(),
            category: Category::DirectFact,
            reference_answer: format!("Reference for {}", text),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            expected_sources: Default::default(),
        }
    }

    fn evaluator(retriever: CannedRetriever, judge: ScriptedLlm) -> Evaluator {
        Evaluator::new(
            Arc::new(retriever),
            Arc::new(CannedResponder::new("A generated answer")),
            Arc::new(judge),
            EvaluationConfig::default(),
        )
    }

    #[test]
    fn test_totals_merge_matches_sequential_add() {
        let evals = [
            (RetrievalEval { mrr: 1.0, ndcg: 0.5, keyword_coverage: 100.0 }, 5.0),
            (RetrievalEval { mrr: 0.5, ndcg: 0.25, keyword_coverage: 50.0 }, 3.0),
            (RetrievalEval { mrr: 0.0, ndcg: 0.0, keyword_coverage: 0.0 }, 1.0),
        ];
        let answer = |score: f64| AnswerEval {
            feedback: String::new(),
            accuracy: score,
            completeness: score,
            relevance: score,
        };

        let mut all = MetricTotals::default();
        for (r, s) in &evals {
            all.add(r, &answer(*s));
        }

        let mut left = MetricTotals::default();
        left.add(&evals[2].0, &answer(evals[2].1));
        let mut right = MetricTotals::default();
        right.add(&evals[0].0, &answer(evals[0].1));
        right.add(&evals[1].0, &answer(evals[1].1));

        let merged = left.merge(right).finish(0).unwrap();
        let sequential = all.finish(0).unwrap();
        assert_eq!(merged.success_count, 3);
        assert!((merged.mean_mrr - sequential.mean_mrr).abs() < 1e-12);
        assert!((merged.mean_accuracy - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_totals_have_no_summary() {
        assert!(MetricTotals::default().finish(4).is_none());
    }

    #[tokio::test]
    async fn test_failed_retrieval_is_skipped_and_excluded() {
        let retriever = CannedRetriever::new()
            .with("Who founded Insurellm?", vec![Chunk::from_text("Avery Lancaster founded it")])
            .failing("What does Insurellm sell?")
            .with(
                "When was Insurellm founded?",
                vec![Chunk::from_text("nothing here"), Chunk::from_text("founded in 2015")],
            );
        let judge = ScriptedLlm::new(vec![Ok(judge_reply(5.0)), Ok(judge_reply(3.0))]);
        let tests = vec![
            question("Who founded Insurellm?", &["Avery Lancaster"]),
            question("What does Insurellm sell?", &["insurance"]),
            question("When was Insurellm founded?", &["2015"]),
        ];

        let mut progress = Vec::new();
        let report = evaluator(retriever, judge)
            .evaluate(&tests, |p| progress.push(*p))
            .await
            .unwrap();

        let summary = &report.summary;
        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failure_count, 1);
        assert!((summary.mean_mrr - 0.75).abs() < 1e-9);
        assert!((summary.mean_keyword_coverage - 100.0).abs() < 1e-9);
        assert!((summary.mean_accuracy - 4.0).abs() < 1e-9);

        assert_eq!(progress.len(), 3);
        assert_eq!(progress[2], EvaluationProgress { completed: 3, total: 3, failed: 1 });
        assert!(matches!(report.outcomes[1].result, QuestionResult::Failed { .. }));
    }

    #[tokio::test]
    async fn test_judge_failure_is_skipped() {
        let retriever = CannedRetriever::new()
            .with("Question one here?", vec![Chunk::from_text("alpha")])
            .with("Question two here?", vec![Chunk::from_text("beta")]);
        let judge = ScriptedLlm::new(vec![
            Err(LlmError::Request("timeout".to_string())),
            Ok(judge_reply(2.0)),
        ]);
        let tests = vec![
            question("Question one here?", &["alpha"]),
            question("Question two here?", &["beta"]),
        ];

        let report = evaluator(retriever, judge).evaluate(&tests, |_| {}).await.unwrap();
        assert_eq!(report.summary.success_count, 1);
        assert_eq!(report.summary.mean_accuracy, 2.0);
    }

    #[tokio::test]
    async fn test_all_failed_is_fatal() {
        let retriever = CannedRetriever::new();
        let tests = vec![question("Unknown question?", &["x"])];

        let err = evaluator(retriever, ScriptedLlm::new(vec![]))
            .evaluate(&tests, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::AllFailed { attempted: 1 }));
        assert_eq!(err.to_string(), "All evaluations failed (1 attempted)");
    }

    #[tokio::test]
    async fn test_zero_top_k_is_rejected() {
        let evaluator = Evaluator::new(
            Arc::new(CannedRetriever::new()),
            Arc::new(CannedResponder::new("answer")),
            Arc::new(ScriptedLlm::new(vec![])),
            EvaluationConfig { top_k: 0 },
        );
        let err = evaluator
            .evaluate(&[question("Anything at all?", &["x"])], |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Config(ConfigError::ZeroTopK)));
    }

    #[tokio::test]
    async fn test_empty_test_set_is_rejected() {
        let err = evaluator(CannedRetriever::new(), ScriptedLlm::new(vec![]))
            .evaluate(&[], |_| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::Config(ConfigError::NoTestQuestions)
        ));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = QuestionOutcome {
            question: "q?".to_string(),
            category: Category::Numerical,
            result: QuestionResult::Failed {
                reason: RetrievalError::QueryFailed("down".to_string()).to_string(),
            },
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["category"], "numerical");
        assert_eq!(value["reason"], "Retrieval failed: down");
    }
}
