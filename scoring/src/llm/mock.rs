//! Mock completion client for tests and local runs without a provider.
//!
//! Returns fixed content (or a fixed failure) and counts calls so tests can assert that the
//! gateway did or did not reach the completion service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Completion, CompletionClient, CompletionRequest, LlmError};
use crate::credential::ApiKey;

enum Reply {
    Content(Option<String>),
    Unauthorized,
    Status(u16, String),
    Transport(String),
}

/// Mock completion client: fixed reply, call counter, last request captured.
pub struct MockCompletion {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletion {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Replies with `content` as the first choice's message.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self::with_reply(Reply::Content(Some(content.into())))
    }

    /// Replies with a choice that has no content.
    pub fn with_empty_content() -> Self {
        Self::with_reply(Reply::Content(None))
    }

    /// Fails as if the service answered 401.
    pub fn unauthorized() -> Self {
        Self::with_reply(Reply::Unauthorized)
    }

    /// Fails as if the service answered `status` with `body`.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Status(status, body.into()))
    }

    /// Fails before any status is received.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::with_reply(Reply::Transport(reason.into()))
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        _key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }
        match &self.reply {
            Reply::Content(content) => Ok(Completion {
                content: content.clone(),
                usage: None,
            }),
            Reply::Unauthorized => Err(LlmError::Unauthorized {
                body: r#"{"error":{"message":"Incorrect API key provided"}}"#.to_string(),
            }),
            Reply::Status(status, body) => Err(LlmError::Status {
                status: *status,
                body: body.clone(),
            }),
            Reply::Transport(reason) => Err(LlmError::Transport(reason.clone())),
        }
    }
}
