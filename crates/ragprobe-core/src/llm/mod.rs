//! LLM access for question synthesis, judging and answering.
//!
//! Everything that talks to a language model goes through the [`LlmClient`]
//! trait so tests and alternative providers can be swapped in. The
//! [`OpenAiClient`] speaks the OpenAI chat-completions protocol, which most
//! local inference servers also expose.
//!
//! Model output is untyped text that is expected to carry JSON. The [`reply`]
//! module turns it into an explicit [`LlmReply`] instead of a generic error.

mod client;
pub mod reply;

pub use client::OpenAiClient;
pub use reply::{parse_reply, strip_code_fence, LlmReply};

use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A chat-completion request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Builds the common system + user prompt request.
    pub fn prompt(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: Some(temperature),
        }
    }
}

/// Chat-completion client.
///
/// Implementations return the raw text of the first choice.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
