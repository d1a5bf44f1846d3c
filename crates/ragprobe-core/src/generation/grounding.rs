//! Grounding validation for generated test cases.
//!
//! A candidate is accepted only when it is textually supported by the window
//! it was generated from. Rejection is a value, not an error: rejected
//! candidates are dropped and logged at debug level.

use crate::config::{MIN_ANSWER_GROUNDING, MIN_KEYWORD_COVERAGE, MIN_TEXT_LEN};
use crate::types::TestQuestion;
use std::fmt;

/// Words ignored when measuring how much of an answer the window supports.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "and", "or", "but", "in", "on", "at", "to",
    "for", "of", "with", "as", "by", "from", "has", "have", "had", "that", "this",
];

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Fraction of keywords found in the window was below the minimum
    KeywordCoverage(f64),
    /// Fraction of meaningful answer words found in the window was below the minimum
    AnswerGrounding(f64),
    QuestionTooShort,
    AnswerTooShort,
    NoKeywords,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::KeywordCoverage(c) => write!(f, "keyword coverage {:.2} too low", c),
            Rejection::AnswerGrounding(g) => write!(f, "answer grounding {:.2} too low", g),
            Rejection::QuestionTooShort => f.write_str("question too short"),
            Rejection::AnswerTooShort => f.write_str("reference answer too short"),
            Rejection::NoKeywords => f.write_str("no keywords"),
        }
    }
}

/// Fraction of `keywords` occurring case-insensitively in `window_lower`.
///
/// `window_lower` must already be lower-cased. Returns `None` for an empty
/// keyword list.
pub fn keyword_coverage(window_lower: &str, keywords: &[String]) -> Option<f64> {
    if keywords.is_empty() {
        return None;
    }
    let found = keywords
        .iter()
        .filter(|kw| window_lower.contains(&kw.to_lowercase()))
        .count();
    Some(found as f64 / keywords.len() as f64)
}

/// Fraction of the answer's meaningful words occurring in `window_lower`.
///
/// Meaningful words are longer than three characters and not stop words.
/// Returns `None` when the answer has no meaningful words.
pub fn answer_grounding(window_lower: &str, answer: &str) -> Option<f64> {
    let answer = answer.to_lowercase();
    let meaningful: Vec<&str> = answer
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w))
        .collect();

    if meaningful.is_empty() {
        return None;
    }
    let found = meaningful
        .iter()
        .filter(|w| window_lower.contains(*w))
        .count();
    Some(found as f64 / meaningful.len() as f64)
}

/// Runs every grounding and structural check against `window`.
pub fn check(window: &str, candidate: &TestQuestion) -> Result<(), Rejection> {
    let window_lower = window.to_lowercase();

    if let Some(coverage) = keyword_coverage(&window_lower, &candidate.keywords) {
        if coverage < MIN_KEYWORD_COVERAGE {
            return Err(Rejection::KeywordCoverage(coverage));
        }
    }

    if let Some(grounding) = answer_grounding(&window_lower, &candidate.reference_answer) {
        if grounding < MIN_ANSWER_GROUNDING {
            return Err(Rejection::AnswerGrounding(grounding));
        }
    }

    if candidate.question.chars().count() < MIN_TEXT_LEN {
        return Err(Rejection::QuestionTooShort);
    }
    if candidate.reference_answer.chars().count() < MIN_TEXT_LEN {
        return Err(Rejection::AnswerTooShort);
    }
    if candidate.keywords.is_empty() {
        return Err(Rejection::NoKeywords);
    }

    Ok(())
}

/// Returns true if `candidate` passes every check of [`check`].
pub fn is_grounded(window: &str, candidate: &TestQuestion) -> bool {
    check(window, candidate).is_ok()
}
