//! OpenAI Chat Completions client implementing [`CompletionClient`].
//!
//! Posts `{model, messages, max_completion_tokens}` to `<base>/v1/chat/completions` with a bearer
//! token and reads `choices[0].message.content`. The HTTP status is inspected directly so a 401 can
//! be told apart from other failures.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Completion, CompletionClient, CompletionRequest, LlmError, LlmUsage};
use crate::credential::ApiKey;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<LlmUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat Completions client over `reqwest`. Cheap to clone; holds no credential.
#[derive(Clone, Debug)]
pub struct ChatOpenAI {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ChatOpenAI {
    fn default() -> Self {
        Self::new(DEFAULT_OPENAI_BASE_URL)
    }
}

impl ChatOpenAI {
    /// Client for the given API base (e.g. `https://api.openai.com` or `http://127.0.0.1:9000/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Chat completions URL. Does not append `/v1` when the base already ends with it.
    pub fn chat_completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

#[async_trait]
impl CompletionClient for ChatOpenAI {
    async fn complete(
        &self,
        key: &ApiKey,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let url = self.chat_completions_url();
        debug!(url = %url, model = %request.model, messages = request.messages.len(), "sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "chat completion response");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "completion service error");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(LlmError::Unauthorized { body });
            }
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);
        Ok(Completion {
            content,
            usage: parsed.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_v1_when_missing() {
        let c = ChatOpenAI::new("https://api.openai.com/");
        assert_eq!(
            c.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn url_keeps_existing_v1() {
        let c = ChatOpenAI::new("http://localhost:9000/v1");
        assert_eq!(
            c.chat_completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn response_without_choices_parses() {
        let r: ChatCompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(r.choices.is_empty());
        assert!(r.usage.is_none());
    }
}
