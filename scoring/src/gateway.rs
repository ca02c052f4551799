//! Stateless scoring gateway.
//!
//! One invocation runs four phases: `receiving` → `validating` → `calling_llm` → `responding`.
//! Each phase is a function returning `Result<_, GatewayError>`; [`Gateway::evaluate`] composes them
//! with `?` and [`Gateway::respond`] turns the outcome into a [`GatewayResponse`]. Nothing is kept
//! between invocations, so one `Gateway` can serve any number of concurrent requests.
//!
//! The credential is handed in at construction ([`Gateway::new`]); it is validated per request,
//! after the idea, so a short idea is reported as 400 even on a misconfigured server.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::credential::ApiKey;
use crate::decode::decode_completion;
use crate::error::GatewayError;
use crate::llm::{CompletionClient, LlmError};
use crate::prompt::build_request;
use crate::protocol::{ErrorBody, GatewayBody, IdeaRequest};
use crate::score::{ScoreBreakdown, DEFAULT_NEUTRAL_SCORE};

pub const DEFAULT_MODEL: &str = "gpt-5-mini-2025-08-07";
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 1000;
/// Server-side minimum idea length, in characters after trimming.
pub const MIN_IDEA_CHARS: usize = 10;

const IDEA_PREVIEW_CHARS: usize = 50;

/// Phase of one gateway invocation, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Receiving,
    Validating,
    CallingLlm,
    Responding,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Receiving => "receiving",
            Phase::Validating => "validating",
            Phase::CallingLlm => "calling_llm",
            Phase::Responding => "responding",
        })
    }
}

/// Gateway settings that do not change per request.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub model: String,
    pub max_completion_tokens: u32,
    /// Score used for any dimension the completion does not provide.
    pub neutral_score: u8,
    /// When true, error bodies carry a `debug` field with the internal detail.
    pub verbose_errors: bool,
    pub min_idea_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_completion_tokens: DEFAULT_MAX_COMPLETION_TOKENS,
            neutral_score: DEFAULT_NEUTRAL_SCORE,
            verbose_errors: false,
            min_idea_chars: MIN_IDEA_CHARS,
        }
    }
}

/// Status and body of one gateway reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: GatewayBody,
}

impl GatewayResponse {
    /// The scores when this is a 200 reply.
    pub fn scores(&self) -> Option<&ScoreBreakdown> {
        match &self.body {
            GatewayBody::Scores(s) => Some(s),
            GatewayBody::Error(_) => None,
        }
    }
}

/// Scoring gateway: validates an idea, calls the completion service once, decodes the result.
pub struct Gateway {
    config: GatewayConfig,
    credential: Option<String>,
    client: Arc<dyn CompletionClient>,
}

impl Gateway {
    pub fn new(
        config: GatewayConfig,
        credential: Option<String>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            credential,
            client,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Handles a raw request body.
    pub async fn handle(&self, body: &[u8]) -> GatewayResponse {
        let outcome = match receive(body) {
            Ok(request) => self.evaluate(request.idea.as_deref()).await,
            Err(e) => Err(e),
        };
        self.respond(outcome)
    }

    /// Scores an idea that is already in hand (in-process callers).
    pub async fn score_idea(&self, idea: &str) -> GatewayResponse {
        let outcome = self.evaluate(Some(idea)).await;
        self.respond(outcome)
    }

    /// Validation, credential check, completion call and decode.
    pub async fn evaluate(&self, idea: Option<&str>) -> Result<ScoreBreakdown, GatewayError> {
        let idea = validate_idea(idea, self.config.min_idea_chars)?;

        info!(phase = %Phase::CallingLlm, credential_present = self.credential.is_some(), "checking credential");
        let key = ApiKey::parse(self.credential.as_deref())?;
        debug!(phase = %Phase::CallingLlm, key_len = key.len(), "credential accepted");

        let content = self.call_llm(&key, idea).await?;

        let decoded = decode_completion(&content, self.config.neutral_score);
        info!(
            phase = %Phase::Responding,
            path = %decoded.path,
            profitability = decoded.breakdown.profitability,
            demand = decoded.breakdown.demand,
            execution = decoded.breakdown.execution,
            "scores ready"
        );
        Ok(decoded.breakdown)
    }

    async fn call_llm(&self, key: &ApiKey, idea: &str) -> Result<String, GatewayError> {
        let request = build_request(&self.config.model, self.config.max_completion_tokens, idea);
        info!(phase = %Phase::CallingLlm, model = %request.model, "calling completion service");

        let completion = self.client.complete(key, &request).await.map_err(|e| {
            warn!(phase = %Phase::CallingLlm, error = %e, "completion call failed");
            match e {
                LlmError::Unauthorized { body } => GatewayError::InvalidCredential(body),
                LlmError::Status { status, body } => GatewayError::Upstream { status, body },
                LlmError::Transport(reason) => GatewayError::Transport(reason),
                LlmError::Decode(reason) => GatewayError::Transport(reason),
            }
        })?;

        if let Some(usage) = &completion.usage {
            debug!(total_tokens = usage.total_tokens, "completion usage");
        }
        match completion.content {
            Some(content) if !content.trim().is_empty() => {
                debug!(
                    phase = %Phase::CallingLlm,
                    content_len = content.len(),
                    preview = %preview(&content, 100),
                    "completion received"
                );
                Ok(content)
            }
            _ => Err(GatewayError::EmptyCompletion),
        }
    }

    /// Builds the reply for an outcome. Success and every error carry a JSON body.
    pub fn respond(&self, outcome: Result<ScoreBreakdown, GatewayError>) -> GatewayResponse {
        match outcome {
            Ok(scores) => {
                info!(phase = %Phase::Responding, status = 200, "responding with scores");
                GatewayResponse {
                    status: StatusCode::OK,
                    body: GatewayBody::Scores(scores),
                }
            }
            Err(e) => {
                let status = e.status();
                warn!(phase = %Phase::Responding, status = status.as_u16(), error = %e, "responding with error");
                GatewayResponse {
                    status,
                    body: GatewayBody::Error(ErrorBody {
                        error: e.message(),
                        debug: self.config.verbose_errors.then(|| e.to_string()),
                    }),
                }
            }
        }
    }
}

/// `receiving`: the body must be a JSON object; `idea`, when present, must be a string.
pub fn receive(body: &[u8]) -> Result<IdeaRequest, GatewayError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        debug!(phase = %Phase::Receiving, error = %e, "body is not JSON");
        GatewayError::MalformedBody(e.to_string())
    })?;
    if !value.is_object() {
        return Err(GatewayError::MalformedBody(
            "body is not a JSON object".to_string(),
        ));
    }
    let request: IdeaRequest =
        serde_json::from_value(value).map_err(|e| GatewayError::MalformedBody(e.to_string()))?;
    info!(
        phase = %Phase::Receiving,
        idea_preview = %request.idea.as_deref().map(|s| preview(s, IDEA_PREVIEW_CHARS)).unwrap_or_default(),
        "request received"
    );
    Ok(request)
}

/// `validating`: the trimmed idea must have at least `min_chars` characters. Returns the idea as
/// submitted (untrimmed); the prompt embeds it verbatim.
pub fn validate_idea(idea: Option<&str>, min_chars: usize) -> Result<&str, GatewayError> {
    match idea {
        Some(text) if text.trim().chars().count() >= min_chars => {
            debug!(phase = %Phase::Validating, chars = text.chars().count(), "idea accepted");
            Ok(text)
        }
        _ => {
            info!(phase = %Phase::Validating, min = min_chars, "idea too short");
            Err(GatewayError::IdeaTooShort { min: min_chars })
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receive_accepts_object_with_idea() {
        let r = receive(br#"{"idea":"a reasonably long idea"}"#).unwrap();
        assert_eq!(r.idea.as_deref(), Some("a reasonably long idea"));
    }

    #[test]
    fn receive_rejects_non_json_and_non_objects() {
        assert!(matches!(receive(b""), Err(GatewayError::MalformedBody(_))));
        assert!(matches!(receive(b"idea=x"), Err(GatewayError::MalformedBody(_))));
        assert!(matches!(
            receive(br#"["a reasonably long idea"]"#),
            Err(GatewayError::MalformedBody(_))
        ));
        assert!(matches!(
            receive(br#"{"idea": 12}"#),
            Err(GatewayError::MalformedBody(_))
        ));
    }

    #[test]
    fn validate_uses_trimmed_length() {
        assert!(validate_idea(Some("   123456789   "), 10).is_err());
        assert_eq!(validate_idea(Some(" 1234567890 "), 10).unwrap(), " 1234567890 ");
        assert!(matches!(
            validate_idea(None, 10),
            Err(GatewayError::IdeaTooShort { min: 10 })
        ));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        assert!(validate_idea(Some("ééééééééé"), 10).is_err());
        assert!(validate_idea(Some("éééééééééé"), 10).is_ok());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo", 2), "hé...");
        assert_eq!(preview("hi", 5), "hi");
    }

    #[test]
    fn phase_names() {
        let names: Vec<String> = [
            Phase::Receiving,
            Phase::Validating,
            Phase::CallingLlm,
            Phase::Responding,
        ]
        .iter()
        .map(|p| p.to_string())
        .collect();
        assert_eq!(names, ["receiving", "validating", "calling_llm", "responding"]);
    }
}
