//! Error types for ragprobe-core.
//!
//! Per-item failures (one window during generation, one question during
//! evaluation) are absorbed by the orchestrators and only logged. Errors that
//! reach the caller are configuration problems, file I/O at the batch boundary,
//! and an evaluation in which nothing succeeded.

use thiserror::Error;

/// Invalid parameters or missing required inputs. Raised before any LLM call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Window size must be positive
    #[error("Context size must be greater than zero")]
    ZeroContextSize,
    /// Window overlap must be smaller than the window size
    #[error("Context overlap ({overlap}) must be smaller than context size ({size})")]
    OverlapTooLarge { size: usize, overlap: usize },
    /// Retrieval depth must be positive
    #[error("top_k must be greater than zero")]
    ZeroTopK,
    /// Generation was started without documents
    #[error("No documents to generate test cases from")]
    NoDocuments,
    /// Evaluation was started without test questions
    #[error("No test questions to evaluate")]
    NoTestQuestions,
}

/// Errors from fetching documents out of a source location.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Source path does not exist
    #[error("Source not found: {0}")]
    NotFound(String),
    /// Failed to walk the source directory or read a file
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
    /// Source contained no matching documents
    #[error("No documents found under {0}")]
    NoDocuments(String),
}

/// Errors from an LLM chat-completion call.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("LLM request failed: {0}")]
    Request(String),
    /// Server answered with a non-success status
    #[error("LLM server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Server answered without any choices or content
    #[error("No response from LLM")]
    EmptyResponse,
    /// Response body could not be decoded
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// Errors while synthesizing questions for a single context window.
///
/// Recoverable: the generation orchestrator skips the window.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// The generation LLM could not be reached or returned nothing
    #[error(transparent)]
    Llm(#[from] LlmError),
    /// The LLM replied, but not with the expected JSON object
    #[error("Unparsable generation response: {reason}")]
    Unparsable { reason: String, raw: String },
}

/// Errors while judging a single generated answer.
///
/// Recoverable: the evaluation orchestrator skips the question.
#[derive(Debug, Clone, Error)]
pub enum JudgeError {
    /// The judge LLM could not be reached
    #[error(transparent)]
    Llm(#[from] LlmError),
    /// The judge replied with blank content
    #[error("No response from LLM judge")]
    EmptyResponse,
    /// The judge replied, but not with the expected JSON object
    #[error("Failed to parse judge response: {reason}")]
    Unparsable { reason: String, raw: String },
}

/// Errors from the retriever collaborator.
#[derive(Debug, Clone, Error)]
pub enum RetrievalError {
    /// Query could not be answered
    #[error("Retrieval failed: {0}")]
    QueryFailed(String),
}

/// Errors from the responder collaborator.
#[derive(Debug, Clone, Error)]
pub enum RespondError {
    /// Context retrieval for the answer failed
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    /// Answer generation failed
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Why a single test question could not be evaluated.
#[derive(Debug, Clone, Error)]
pub enum QuestionFailure {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error(transparent)]
    Respond(#[from] RespondError),
    #[error(transparent)]
    Judge(#[from] JudgeError),
}

/// Fatal evaluation errors.
#[derive(Debug, Clone, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every question failed, so no summary can be produced
    #[error("All evaluations failed ({attempted} attempted)")]
    AllFailed { attempted: usize },
}

/// Errors reading or writing a test-case file.
#[derive(Debug, Error)]
pub enum TestFileError {
    #[error("Test file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Test file JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
