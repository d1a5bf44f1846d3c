//! Turning free-text LLM replies into typed payloads.

use serde::de::DeserializeOwned;

/// Outcome of parsing an LLM reply.
#[derive(Debug, Clone, PartialEq)]
pub enum LlmReply<T> {
    /// The reply carried the expected JSON payload
    Parsed(T),
    /// The reply could not be decoded; `raw` is the text that was attempted
    Unparsable { raw: String, reason: String },
}

impl<T> LlmReply<T> {
    /// Converts into a `Result`, mapping the unparsable case with `f`.
    pub fn into_result<E>(self, f: impl FnOnce(String, String) -> E) -> Result<T, E> {
        match self {
            LlmReply::Parsed(value) => Ok(value),
            LlmReply::Unparsable { raw, reason } => Err(f(raw, reason)),
        }
    }
}

/// Trims whitespace and removes a surrounding Markdown code fence.
///
/// A reply starting with ```` ``` ```` that spans more than two lines loses its
/// first and last lines (the fence markers). Anything else is only trimmed.
pub fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    if !content.starts_with("```") {
        return content;
    }

    match (content.find('\n'), content.rfind('\n')) {
        (Some(first), Some(last)) if first < last => &content[first + 1..last],
        _ => content,
    }
}

/// Strips any code fence and decodes the reply as JSON.
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> LlmReply<T> {
    let payload = strip_code_fence(raw);
    match serde_json::from_str(payload) {
        Ok(value) => LlmReply::Parsed(value),
        Err(e) => LlmReply::Unparsable {
            raw: payload.to_string(),
            reason: e.to_string(),
        },
    }
}
