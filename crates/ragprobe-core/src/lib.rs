//! # ragprobe Core
//!
//! Evaluation harness for retrieval-augmented generation (RAG) systems.
//!
//! This crate synthesizes grounded question/answer test cases from a document
//! corpus and scores a RAG pipeline's retrieval and answers against them. It is
//! reusable across frontends; the `ragprobe` CLI is a thin layer on top.
//!
//! ## Modules
//!
//! - [`windowing`] - Overlapping character windows over document text
//! - [`generation`] - Question synthesis, grounding checks, generation orchestrator
//! - [`evaluation`] - Ranking metrics, LLM judge, evaluation orchestrator
//! - [`llm`] - Chat-completion client trait and OpenAI-compatible implementation
//! - [`rag`] - Fetcher, retriever and responder collaborators
//! - [`test_file`] - Test-case file load/save
//! - [`types`] - Shared data model
//! - [`config`] - Default constants
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod evaluation;
pub mod generation;
pub mod llm;
pub mod rag;
pub mod test_file;
pub mod types;
pub mod windowing;

#[cfg(test)]
mod test_utils;

pub use error::{ConfigError, EvaluationError, FetchError, TestFileError};
pub use evaluation::{EvaluationConfig, EvaluationReport, EvaluationSummary, Evaluator};
pub use generation::{GenerationConfig, GenerationProgress, TestGenerator};
pub use test_file::TestFile;
pub use types::{AnswerEval, Category, Chunk, Document, RetrievalEval, TestQuestion};
