//! Test utilities for ragprobe-core.
//!
//! Scripted stand-ins for the LLM, retriever and responder so the
//! orchestrators can be tested without a network. Only compiled when running
//! tests.

use crate::error::{LlmError, RespondError, RetrievalError};
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::rag::{Responder, Retriever};
use crate::types::Chunk;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// LLM client that replays a fixed script of replies and records requests.
///
/// Once the script runs out every call fails with `LlmError::EmptyResponse`.
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

/// Retriever with fixed results per query text. Unknown queries fail.
#[derive(Default)]
pub struct CannedRetriever {
    results: HashMap<String, Option<Vec<Chunk>>>,
}

impl CannedRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, chunks: Vec<Chunk>) -> Self {
        self.results.insert(query.to_string(), Some(chunks));
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.results.insert(query.to_string(), None);
        self
    }
}

#[async_trait]
impl Retriever for CannedRetriever {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<Chunk>, RetrievalError> {
        match self.results.get(text) {
            Some(Some(chunks)) => Ok(chunks.iter().take(top_k).cloned().collect()),
            _ => Err(RetrievalError::QueryFailed(format!("no results for {}", text))),
        }
    }
}

/// Responder that always gives the same answer.
pub struct CannedResponder {
    answer: String,
}

impl CannedResponder {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
        }
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, _: &[ChatMessage], _: &str) -> Result<String, RespondError> {
        Ok(self.answer.clone())
    }
}

/// Generation reply with `n` questions grounded in
/// "Insurellm was founded in 2015 by Avery Lancaster in Calgary."
pub fn question_reply(n: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "question": format!("When was Insurellm founded? (variant {})", i),
                "category": "direct_fact",
                "reference_answer": "Founded in 2015 in Calgary by Avery Lancaster.",
                "keywords": ["2015", "Calgary"],
            })
        })
        .collect();
    serde_json::json!({ "questions": questions }).to_string()
}

/// Judge reply giving `score` on every dimension.
pub fn judge_reply(score: f64) -> String {
    serde_json::json!({
        "feedback": "scripted",
        "accuracy": score,
        "completeness": score,
        "relevance": score,
    })
    .to_string()
}
