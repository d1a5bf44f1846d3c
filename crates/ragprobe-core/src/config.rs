//! Default configuration constants.
//!
//! These values define the default behaviour of test generation and evaluation.
//! They are used by [`GenerationConfig::default`](crate::generation::GenerationConfig)
//! and [`EvaluationConfig::default`](crate::evaluation::EvaluationConfig), and by
//! the CLI as fallbacks when no flag or environment variable is given.
//!
//! # Usage
//!
//! ```
//! use ragprobe_core::config::{DEFAULT_CONTEXT_OVERLAP, DEFAULT_CONTEXT_SIZE};
//!
//! let step = DEFAULT_CONTEXT_SIZE - DEFAULT_CONTEXT_OVERLAP;
//! assert_eq!(step, 1200);
//! ```

// =============================================================================
// Test Generation
// =============================================================================

/// Characters per context window handed to the generation LLM.
pub const DEFAULT_CONTEXT_SIZE: usize = 1500;

/// Characters shared by two adjacent context windows.
///
/// Must stay strictly below [`DEFAULT_CONTEXT_SIZE`], otherwise the window
/// cursor cannot advance.
pub const DEFAULT_CONTEXT_OVERLAP: usize = 300;

/// Number of questions requested from the LLM for each window.
pub const DEFAULT_QUESTIONS_PER_WINDOW: usize = 3;

/// Sampling temperature for question synthesis.
///
/// Some creativity so questions vary, biased toward determinism.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

// =============================================================================
// Grounding Thresholds
// =============================================================================

/// Minimum fraction of a candidate's keywords that must occur in its window.
pub const MIN_KEYWORD_COVERAGE: f64 = 0.5;

/// Minimum fraction of meaningful reference-answer tokens found in the window.
pub const MIN_ANSWER_GROUNDING: f64 = 0.3;

/// Minimum length (characters) of both the question and the reference answer.
pub const MIN_TEXT_LEN: usize = 10;

// =============================================================================
// Evaluation
// =============================================================================

/// Number of ranked chunks requested from the retriever per test question.
pub const DEFAULT_TOP_K: usize = 5;

/// Sampling temperature for the answer judge.
pub const JUDGE_TEMPERATURE: f32 = 0.0;

/// Lowest score the judge rubric allows.
pub const MIN_JUDGE_SCORE: f64 = 1.0;

/// Highest score the judge rubric allows.
pub const MAX_JUDGE_SCORE: f64 = 5.0;

// =============================================================================
// Reference Pipeline
// =============================================================================

/// Chunk size (characters) used when indexing a corpus for keyword retrieval.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Chunk overlap (characters) used when indexing a corpus for keyword retrieval.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// File extensions picked up by the text fetcher when none are configured.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[".txt", ".md"];

/// Model name sent to OpenAI-compatible servers when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_step_is_positive() {
        // Using explicit comparisons to avoid clippy::assertions_on_constants
        let (size, overlap) = (DEFAULT_CONTEXT_SIZE, DEFAULT_CONTEXT_OVERLAP);
        assert!(overlap < size, "overlap must be below window size");
    }

    #[test]
    fn test_default_chunk_step_is_positive() {
        let (size, overlap) = (DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP);
        assert!(overlap < size, "chunk overlap must be below chunk size");
    }

    #[test]
    fn test_judge_score_range() {
        let (min, max) = (MIN_JUDGE_SCORE, MAX_JUDGE_SCORE);
        assert!(min < max);
    }
}
