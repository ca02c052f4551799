//! Gateway error taxonomy.
//!
//! Every failure inside the gateway becomes one of these variants. Each variant knows its HTTP
//! status and the message shown to callers. The `Display` text carries the internal detail and is
//! only sent as `debug` when verbose errors are enabled. A panic never reaches this type; the HTTP
//! layer catches it and answers with [`INTERNAL_ERROR_MESSAGE`].

use reqwest::StatusCode;
use thiserror::Error;

use crate::credential::CredentialError;

/// Message for the catch-all internal error, sent by the HTTP layer's panic handler.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please try again.";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Body absent or not `{ "idea": string }`.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    /// Idea missing or shorter than `min` characters after trimming.
    #[error("idea shorter than {min} characters")]
    IdeaTooShort { min: usize },
    /// API key missing or malformed; raised before any outbound call.
    #[error(transparent)]
    Credential(#[from] CredentialError),
    /// The completion service rejected the key (401).
    #[error("completion service rejected the API key: {0}")]
    InvalidCredential(String),
    /// Any other non-success status from the completion service.
    #[error("completion service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    /// The completion service could not be reached or answered garbage.
    #[error("completion service unreachable: {0}")]
    Transport(String),
    /// The completion had no content.
    #[error("completion had no content")]
    EmptyCompletion,
}

impl GatewayError {
    /// HTTP status for this error. Only caller mistakes are 400; everything else is 500.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MalformedBody(_) | GatewayError::IdeaTooShort { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message for the `error` field.
    pub fn message(&self) -> String {
        match self {
            GatewayError::MalformedBody(_) => {
                "Request body must be a JSON object with an \"idea\" string".to_string()
            }
            GatewayError::IdeaTooShort { min } => format!(
                "Please provide a more detailed business idea (at least {} characters)",
                min
            ),
            GatewayError::Credential(CredentialError::Missing) => {
                "OpenAI API key not configured. Please add your OpenAI API key to the server environment."
                    .to_string()
            }
            GatewayError::Credential(CredentialError::Malformed) => {
                "Invalid OpenAI API key format. Please check your API key.".to_string()
            }
            GatewayError::InvalidCredential(_) => {
                "Invalid OpenAI API key. Please check your API key configuration.".to_string()
            }
            GatewayError::Upstream { status, body } => {
                format!("OpenAI API error ({}): {}", status, body)
            }
            GatewayError::Transport(_) => "Could not reach OpenAI. Please try again.".to_string(),
            GatewayError::EmptyCompletion => "No response from OpenAI. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_400() {
        assert_eq!(
            GatewayError::IdeaTooShort { min: 10 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::MalformedBody("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn configuration_and_upstream_errors_are_500() {
        for e in [
            GatewayError::Credential(CredentialError::Missing),
            GatewayError::Credential(CredentialError::Malformed),
            GatewayError::InvalidCredential("401".into()),
            GatewayError::Upstream {
                status: 429,
                body: "slow down".into(),
            },
            GatewayError::Transport("refused".into()),
            GatewayError::EmptyCompletion,
        ] {
            assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR, "{:?}", e);
        }
    }

    #[test]
    fn too_short_message_names_minimum() {
        let msg = GatewayError::IdeaTooShort { min: 10 }.message();
        assert_eq!(
            msg,
            "Please provide a more detailed business idea (at least 10 characters)"
        );
    }

    #[test]
    fn missing_and_malformed_key_messages_differ() {
        let missing = GatewayError::from(CredentialError::Missing).message();
        let malformed = GatewayError::from(CredentialError::Malformed).message();
        assert!(missing.contains("not configured"));
        assert!(malformed.contains("format"));
    }

    #[test]
    fn upstream_message_includes_status_and_body() {
        let msg = GatewayError::Upstream {
            status: 503,
            body: "overloaded".into(),
        }
        .message();
        assert_eq!(msg, "OpenAI API error (503): overloaded");
    }
}
