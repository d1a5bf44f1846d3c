//! Output formatting for generation and evaluation results.
//!
//! Supports both human-readable terminal output and JSON for scripting.

use anyhow::Result;
use ragprobe_core::evaluation::{EvaluationReport, EvaluationSummary};
use ragprobe_core::{Category, GenerationProgress};
use std::collections::BTreeMap;
use std::path::Path;

/// Formats the result of a generation run with its per-category breakdown.
pub fn format_generation(
    count: usize,
    path: &Path,
    categories: &BTreeMap<Category, usize>,
) -> String {
    let mut output = format!(
        "\nGenerated {} test cases, written to {}\n",
        count,
        path.display()
    );
    if !categories.is_empty() {
        output.push_str("\nCategory breakdown:\n");
        for (category, n) in categories {
            output.push_str(&format!("  {:<15} {}\n", category.as_str(), n));
        }
    }
    output.trim_end().to_string()
}

/// Progress bar message for a generation run.
pub fn format_generation_progress(progress: &GenerationProgress) -> String {
    let mut message = format!("Generating [{}]", progress.category);
    if let Some(percent) = progress.percent_complete() {
        message.push_str(&format!(" {:.0}%", percent));
    }
    message.push_str(&format!(" {:.2}/window", progress.yield_per_window()));
    if progress.windows_failed > 0 {
        message.push_str(&format!(", {} failed", progress.windows_failed));
    }
    message
}

/// Formats the evaluation summary for human-readable terminal output.
pub fn format_summary(summary: &EvaluationSummary) -> String {
    let mut output = format!("\n=== Summary ({} tests) ===\n", summary.success_count);
    if summary.failure_count > 0 {
        output.push_str(&format!("({} failed and were skipped)\n", summary.failure_count));
    }
    output.push_str("Retrieval Metrics:\n");
    output.push_str(&format!("  Avg MRR:              {:.3}\n", summary.mean_mrr));
    output.push_str(&format!("  Avg NDCG:             {:.3}\n", summary.mean_ndcg));
    output.push_str(&format!(
        "  Avg Keyword Coverage: {:.1}%\n",
        summary.mean_keyword_coverage
    ));
    output.push_str("\nAnswer Metrics:\n");
    output.push_str(&format!("  Avg Accuracy:         {:.2}/5\n", summary.mean_accuracy));
    output.push_str(&format!(
        "  Avg Completeness:     {:.2}/5\n",
        summary.mean_completeness
    ));
    output.push_str(&format!("  Avg Relevance:        {:.2}/5", summary.mean_relevance));
    output
}

/// Formats the full evaluation report as JSON.
pub fn format_report_json(report: &EvaluationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragprobe_core::evaluation::{QuestionOutcome, QuestionResult};
    use ragprobe_core::{AnswerEval, RetrievalEval};

    fn summary(failures: usize) -> EvaluationSummary {
        EvaluationSummary {
            success_count: 2,
            failure_count: failures,
            mean_mrr: 0.75,
            mean_ndcg: 0.8154,
            mean_keyword_coverage: 83.333,
            mean_accuracy: 4.0,
            mean_completeness: 3.5,
            mean_relevance: 4.25,
        }
    }

    #[test]
    fn test_format_generation_breakdown() {
        let counts = BTreeMap::from([(Category::DirectFact, 7), (Category::Temporal, 3)]);
        let output = format_generation(10, Path::new("tests.json"), &counts);

        assert!(output.contains("Generated 10 test cases, written to tests.json"));
        assert!(output.contains("Category breakdown:"));
        assert!(output.contains("  direct_fact     7"));
        assert!(output.contains("  temporal        3"));
        assert!(output.find("direct_fact") < output.find("temporal"));
    }

    #[test]
    fn test_format_generation_empty() {
        let output = format_generation(0, Path::new("out.json"), &BTreeMap::new());
        assert!(!output.contains("Category breakdown"));
    }

    fn progress(max_tests: usize, windows_failed: usize) -> GenerationProgress {
        GenerationProgress {
            accepted: 6,
            max_tests,
            category: Category::Temporal,
            windows_processed: 4,
            windows_failed,
            elapsed_ms: 1200,
        }
    }

    #[test]
    fn test_format_generation_progress_capped() {
        let message = format_generation_progress(&progress(24, 0));
        assert_eq!(message, "Generating [temporal] 25% 1.50/window");
    }

    #[test]
    fn test_format_generation_progress_unbounded_with_failures() {
        let message = format_generation_progress(&progress(0, 1));
        assert_eq!(message, "Generating [temporal] 1.50/window, 1 failed");
    }

    #[test]
    fn test_format_summary() {
        let output = format_summary(&summary(0));
        assert!(output.contains("=== Summary (2 tests) ==="));
        assert!(output.contains("Avg MRR:              0.750"));
        assert!(output.contains("Avg NDCG:             0.815"));
        assert!(output.contains("Avg Keyword Coverage: 83.3%"));
        assert!(output.contains("Avg Accuracy:         4.00/5"));
        assert!(output.contains("Avg Relevance:        4.25/5"));
        assert!(!output.contains("skipped"));
    }

    #[test]
    fn test_format_summary_mentions_failures() {
        assert!(format_summary(&summary(1)).contains("(1 failed and were skipped)"));
    }

    #[test]
    fn test_format_report_json() {
        let report = EvaluationReport {
            summary: summary(0),
            outcomes: vec![QuestionOutcome {
                question: "Who is the CEO?".to_string(),
                category: Category::DirectFact,
                result: QuestionResult::Evaluated {
                    retrieval: RetrievalEval {
                        mrr: 1.0,
                        ndcg: 1.0,
                        keyword_coverage: 100.0,
                    },
                    answer: AnswerEval {
                        feedback: "Correct".to_string(),
                        accuracy: 5.0,
                        completeness: 5.0,
                        relevance: 5.0,
                    },
                    generated_answer: "Avery Lancaster.".to_string(),
                },
            }],
        };

        let output = format_report_json(&report).unwrap();
        assert!(output.contains("\"success_count\": 2"));
        assert!(output.contains("\"status\": \"evaluated\""));
        assert!(output.contains("\"generated_answer\": \"Avery Lancaster.\""));
    }
}
