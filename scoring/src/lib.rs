//! Business-idea scoring: the gateway that turns an idea into three clamped scores, and the
//! client-side model that renders them.
//!
//! # Gateway
//!
//! [`Gateway`] is stateless. Per request it parses `{ "idea": string }`, checks the idea length,
//! checks the API key, makes one call through a [`CompletionClient`] with the fixed rubric in
//! [`prompt`], and decodes the completion with [`decode_completion`] (strict JSON first, then
//! field-by-field recovery; both clamp into `[1, 100]`). Failures become [`GatewayError`]s with an
//! HTTP status; none escape as panics.
//!
//! # Client
//!
//! [`IdeaIntake`] holds the form state and allows one submission in flight. [`HttpGatewayClient`]
//! calls a running gateway; any failure is replaced by [`placeholder_breakdown`]. [`ScoreReport`]
//! carries the mean, the letter grade, per-dimension bands and the overall narrative; [`gauge`]
//! has the radial gauge geometry and timing.
//!
//! **Public API**: [`Gateway`], [`GatewayConfig`], [`ChatOpenAI`], [`MockCompletion`],
//! [`IdeaIntake`], [`HttpGatewayClient`], [`ScoreReport`].

pub mod credential;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod gauge;
pub mod intake;
pub mod llm;
pub mod prompt;
pub mod protocol;
pub mod report;
pub mod score;

pub use credential::{ApiKey, CredentialError};
pub use decode::{
    decode_completion, decode_strict, fallback_reasoning, normalize, recover_fields, DecodeError,
    DecodePath, Decoded, RawScores,
};
pub use error::{GatewayError, INTERNAL_ERROR_MESSAGE};
pub use gateway::{
    Gateway, GatewayConfig, GatewayResponse, Phase, DEFAULT_MAX_COMPLETION_TOKENS, DEFAULT_MODEL,
    MIN_IDEA_CHARS,
};
pub use intake::{
    placeholder_breakdown, resolve, ClientError, HttpGatewayClient, IdeaIntake, IntakeError,
    IntakeState, ScoreOrigin, IDEA_COUNTER_LIMIT, MIN_CLIENT_IDEA_CHARS, PLACEHOLDER_OVERALL,
};
pub use llm::{
    ChatOpenAI, Completion, CompletionClient, CompletionRequest, LlmError, LlmUsage, Message,
    MockCompletion, DEFAULT_OPENAI_BASE_URL,
};
pub use protocol::{ErrorBody, GatewayBody, IdeaRequest};
pub use report::{mean_score, overall_grade, Band, DimensionRow, OverallGrade, ScoreReport, Tone};
pub use score::{clamp_score, Dimension, ScoreBreakdown, DEFAULT_NEUTRAL_SCORE, SCORE_MAX, SCORE_MIN};
