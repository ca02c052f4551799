//! Client half: idea intake state machine, gateway client and the placeholder fallback.
//!
//! The intake allows one submission in flight. Every settlement ends in a results view: when
//! the gateway call fails for any reason the client draws its own placeholder scores, so the
//! user never ends on an error screen. This fallback is separate from the gateway's own
//! neutral-default policy and applies even when the gateway is unreachable.

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::gateway::GatewayResponse;
use crate::protocol::{ErrorBody, GatewayBody, IdeaRequest};
use crate::report::ScoreReport;
use crate::score::{Dimension, ScoreBreakdown, DEFAULT_NEUTRAL_SCORE};

/// Client-side minimum, counted on the text as typed.
pub const MIN_CLIENT_IDEA_CHARS: usize = 20;
/// Soft limit shown in the character counter.
pub const IDEA_COUNTER_LIMIT: usize = 1000;

/// Overall narrative shown with placeholder scores.
pub const PLACEHOLDER_OVERALL: &str = "The scoring service is unavailable right now, so these are placeholder scores rather than an assessment of your idea. Please validate it again later.";

/// Why the client did not get scores from the gateway.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("gateway unreachable: {0}")]
    Transport(String),
    #[error("gateway answered {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("unreadable gateway reply: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please enter at least {min} characters (currently {len}).")]
    TooShort { min: usize, len: usize },
    #[error("A validation is already in progress.")]
    InFlight,
}

/// Where the scores in a results view came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreOrigin {
    Gateway,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntakeState {
    Input,
    Loading,
    Results {
        report: ScoreReport,
        origin: ScoreOrigin,
    },
}

/// Intake form state: the text being typed and the current view.
#[derive(Clone, Debug)]
pub struct IdeaIntake {
    text: String,
    state: IntakeState,
}

impl Default for IdeaIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl IdeaIntake {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            state: IntakeState::Input,
        }
    }

    pub fn state(&self) -> &IntakeState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Ignored while a submission is in flight.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if !self.is_loading() {
            self.text = text.into();
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Counter label, e.g. `42/1000`.
    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), IDEA_COUNTER_LIMIT)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, IntakeState::Loading)
    }

    /// Submit is enabled only with enough text and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> Result<(), IntakeError> {
        if self.is_loading() {
            return Err(IntakeError::InFlight);
        }
        let len = self.char_count();
        if len < MIN_CLIENT_IDEA_CHARS || self.text.trim().is_empty() {
            return Err(IntakeError::TooShort {
                min: MIN_CLIENT_IDEA_CHARS,
                len,
            });
        }
        Ok(())
    }

    /// Enters `Loading` and returns the trimmed idea to send.
    pub fn begin_submit(&mut self) -> Result<String, IntakeError> {
        self.check()?;
        self.state = IntakeState::Loading;
        Ok(self.text.trim().to_string())
    }

    /// Settles the in-flight submission. Any error is replaced by placeholder scores.
    /// Returns `None` when nothing was in flight.
    pub fn settle<R: Rng + ?Sized>(
        &mut self,
        result: Result<ScoreBreakdown, ClientError>,
        rng: &mut R,
    ) -> Option<&ScoreReport> {
        if !self.is_loading() {
            debug!("settle without a submission in flight, ignoring");
            return None;
        }
        let (report, origin) = resolve(result, rng);
        self.state = IntakeState::Results { report, origin };
        match &self.state {
            IntakeState::Results { report, .. } => Some(report),
            _ => None,
        }
    }

    /// "Validate another idea": back to an empty input.
    pub fn discard(&mut self) {
        if !self.is_loading() {
            self.text.clear();
            self.state = IntakeState::Input;
        }
    }
}

/// Turns a gateway outcome into a report, substituting placeholder scores on failure.
pub fn resolve<R: Rng + ?Sized>(
    result: Result<ScoreBreakdown, ClientError>,
    rng: &mut R,
) -> (ScoreReport, ScoreOrigin) {
    match result {
        Ok(scores) => (ScoreReport::new(scores, None), ScoreOrigin::Gateway),
        Err(e) => {
            warn!(error = %e, "scoring failed, showing placeholder scores");
            (
                ScoreReport::new(
                    placeholder_breakdown(rng),
                    Some(PLACEHOLDER_OVERALL.to_string()),
                ),
                ScoreOrigin::Placeholder,
            )
        }
    }
}

/// Canned reasoning for placeholder scores.
pub fn placeholder_reasoning(dimension: Dimension) -> String {
    format!(
        "The scoring service is temporarily unavailable. This {} score is a placeholder and does not reflect your idea.",
        dimension.label().to_lowercase()
    )
}

/// Three random scores in `[60, 100)` with "service unavailable" reasoning.
pub fn placeholder_breakdown<R: Rng + ?Sized>(rng: &mut R) -> ScoreBreakdown {
    ScoreBreakdown {
        profitability: rng.gen_range(60..100),
        demand: rng.gen_range(60..100),
        execution: rng.gen_range(60..100),
        profitability_reasoning: placeholder_reasoning(Dimension::Profitability),
        demand_reasoning: placeholder_reasoning(Dimension::Demand),
        execution_reasoning: placeholder_reasoning(Dimension::Execution),
    }
}

impl GatewayResponse {
    /// What a client sees from this reply: scores on 200, otherwise a rejection.
    pub fn into_client_result(self) -> Result<ScoreBreakdown, ClientError> {
        match self.body {
            GatewayBody::Scores(scores) if self.status.is_success() => Ok(scores),
            GatewayBody::Scores(_) => Err(ClientError::Rejected {
                status: self.status.as_u16(),
                message: String::new(),
            }),
            GatewayBody::Error(ErrorBody { error, .. }) => Err(ClientError::Rejected {
                status: self.status.as_u16(),
                message: error,
            }),
        }
    }
}

/// HTTP client for the gateway endpoint.
#[derive(Clone, Debug)]
pub struct HttpGatewayClient {
    http: reqwest::Client,
    url: String,
}

impl HttpGatewayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts `{ "idea": ... }` and reads the scores. Scores are clamped again on arrival.
    pub async fn score(&self, idea: &str) -> Result<ScoreBreakdown, ClientError> {
        let response = self
            .http
            .post(&self.url)
            .json(&IdeaRequest {
                idea: Some(idea.to_string()),
            })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let scores: ScoreBreakdown =
            serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(scores.clamped(DEFAULT_NEUTRAL_SCORE))
    }
}
