//! Completion client abstraction used by the gateway's `calling_llm` phase.
//!
//! The gateway builds one [`CompletionRequest`] per idea and hands it, together with the
//! already-validated [`ApiKey`], to a [`CompletionClient`]. The client returns the first choice's
//! message content; it never interprets the content.
//!
//! Implementations: [`ChatOpenAI`] (real API over `reqwest`) and [`MockCompletion`] (tests).

mod mock;
mod openai;

pub use mock::MockCompletion;
pub use openai::{ChatOpenAI, DEFAULT_OPENAI_BASE_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credential::ApiKey;

/// One chat message. Serializes as `{"role": "...", "content": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum Message {
    System(String),
    User(String),
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message::User(content.into())
    }
}

/// Body of one chat completion call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_completion_tokens: u32,
}

/// Token usage for one call, when the service reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Result of a successful call: the first choice's content (`None` or empty when the service
/// answered without text).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    pub content: Option<String>,
    pub usage: Option<LlmUsage>,
}

/// Failure talking to the completion service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection, TLS or timeout failure; no HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered 401.
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },
    /// Any other non-success status.
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Success status but the body was not a chat completion.
    #[error("unreadable completion response: {0}")]
    Decode(String),
}

/// Sends one completion request and returns the first choice's content.
///
/// One call per gateway invocation: no retry, no streaming, no timeout override.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError>;
}
