//! Collaborators of the RAG pipeline under test.
//!
//! The harness only depends on three narrow traits:
//!
//! - [`Fetcher`]: loads the document corpus
//! - [`Retriever`]: returns ranked chunks for a query
//! - [`Responder`]: answers a question using retrieval + generation
//!
//! Reference implementations are provided so the CLI runs end-to-end without
//! an external vector database: [`TextFetcher`] reads text files from disk,
//! [`KeywordRetriever`] ranks windowed chunks with BM25, and [`LlmResponder`]
//! stuffs the retrieved chunks into a system prompt.

mod fetcher;
mod keyword;
mod responder;

pub use fetcher::TextFetcher;
pub use keyword::KeywordRetriever;
pub use responder::{LlmResponder, DEFAULT_SYSTEM_PROMPT_TEMPLATE};

use crate::error::{FetchError, RespondError, RetrievalError};
use crate::llm::ChatMessage;
use crate::types::{Chunk, Document};
use async_trait::async_trait;

/// Loads every document under a source location.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, source: &str) -> Result<Vec<Document>, FetchError>;
}

/// Ranked chunk retrieval.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns up to `top_k` chunks, most relevant first.
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<Chunk>, RetrievalError>;
}

/// Answer generation over retrieved context.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Answers `query`, with `messages` as the conversation so far.
    async fn respond(&self, messages: &[ChatMessage], query: &str)
        -> Result<String, RespondError>;
}
