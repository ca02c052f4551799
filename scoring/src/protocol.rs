//! Wire types of the gateway endpoint.
//!
//! Request: `{ "idea": string }`. Response: a [`ScoreBreakdown`] on 200, otherwise
//! `{ "error": string, "debug"?: string }`.

use serde::{Deserialize, Serialize};

use crate::score::ScoreBreakdown;

/// Request body. `idea` is optional here so a missing field reaches validation and is reported
/// as "too short" rather than as a malformed body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRequest {
    #[serde(default)]
    pub idea: Option<String>,
}

/// Error body for every non-200 reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

/// Either body shape, as serialized on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GatewayBody {
    Scores(ScoreBreakdown),
    Error(ErrorBody),
}
