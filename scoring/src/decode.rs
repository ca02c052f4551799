//! Two-stage decode of the completion text into a [`ScoreBreakdown`].
//!
//! 1. [`decode_strict`]: the whole completion must be a JSON object of the expected shape.
//! 2. [`recover_fields`]: when stage 1 fails, each score is pulled out of the raw text with the
//!    pattern `"<field>":\s*(\d+)`; reasoning cannot be recovered and falls back to canned text.
//!
//! Both stages produce [`RawScores`], and both funnel into [`normalize`], which clamps every score
//! and fills every missing field. [`decode_completion`] composes the three.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::score::{clamp_score, Dimension, ScoreBreakdown};

/// Canned reasoning used when the completion gives none for a dimension.
pub fn fallback_reasoning(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Profitability => {
            "This idea shows potential for revenue generation through various monetization strategies."
        }
        Dimension::Demand => {
            "There appears to be market interest based on similar successful businesses in this space."
        }
        Dimension::Execution => {
            "The technical requirements are manageable with proper planning and resources."
        }
    }
}

/// Scores as read from a completion, before clamping and defaulting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawScores {
    pub profitability: Option<f64>,
    pub demand: Option<f64>,
    pub execution: Option<f64>,
    pub profitability_reasoning: Option<String>,
    pub demand_reasoning: Option<String>,
    pub execution_reasoning: Option<String>,
}

impl RawScores {
    fn set_score(&mut self, dimension: Dimension, value: Option<f64>) {
        match dimension {
            Dimension::Profitability => self.profitability = value,
            Dimension::Demand => self.demand = value,
            Dimension::Execution => self.execution = value,
        }
    }
}

/// Which stage produced the breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodePath {
    Strict,
    Recovered,
}

impl std::fmt::Display for DecodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodePath::Strict => f.write_str("strict"),
            DecodePath::Recovered => f.write_str("recovered"),
        }
    }
}

/// Why [`decode_strict`] rejected a completion.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("completion is not JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("completion is JSON but not an object")]
    NotAnObject,
}

/// Wire shape of the completion. Fields are loose `Value`s so a wrong type in one field degrades
/// that field to its default instead of failing the whole object.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionScores {
    #[serde(default)]
    profitability: Option<Value>,
    #[serde(default)]
    demand: Option<Value>,
    #[serde(default)]
    execution: Option<Value>,
    #[serde(default)]
    profitability_reasoning: Option<Value>,
    #[serde(default)]
    demand_reasoning: Option<Value>,
    #[serde(default)]
    execution_reasoning: Option<Value>,
}

/// Numbers, or strings holding a number (`"85"`). Anything else is treated as absent.
fn as_number(v: Option<Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn as_text(v: Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Stage 1: the completion parses as a JSON object.
pub fn decode_strict(content: &str) -> Result<RawScores, DecodeError> {
    let value: Value = serde_json::from_str(content.trim())?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let parsed: CompletionScores = serde_json::from_value(value)?;
    Ok(RawScores {
        profitability: as_number(parsed.profitability),
        demand: as_number(parsed.demand),
        execution: as_number(parsed.execution),
        profitability_reasoning: as_text(parsed.profitability_reasoning),
        demand_reasoning: as_text(parsed.demand_reasoning),
        execution_reasoning: as_text(parsed.execution_reasoning),
    })
}

static FIELD_PATTERNS: Lazy<[(Dimension, Regex); 3]> = Lazy::new(|| {
    Dimension::ALL.map(|d| {
        let pattern = format!(r#""{}":\s*(\d+)"#, d.field());
        (d, Regex::new(&pattern).expect("score field pattern is valid"))
    })
});

/// Stage 2: pulls each score out of free text. First match wins; reasoning is never recovered.
pub fn recover_fields(content: &str) -> RawScores {
    let mut raw = RawScores::default();
    for (dimension, re) in FIELD_PATTERNS.iter() {
        let value = re
            .captures(content)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        raw.set_score(*dimension, value);
    }
    raw
}

/// Clamps every score (absent → `neutral`) and fills missing reasoning with canned text.
pub fn normalize(raw: RawScores, neutral: u8) -> ScoreBreakdown {
    let reasoning = |text: Option<String>, d: Dimension| {
        text.unwrap_or_else(|| fallback_reasoning(d).to_string())
    };
    ScoreBreakdown {
        profitability: clamp_score(raw.profitability, neutral),
        demand: clamp_score(raw.demand, neutral),
        execution: clamp_score(raw.execution, neutral),
        profitability_reasoning: reasoning(raw.profitability_reasoning, Dimension::Profitability),
        demand_reasoning: reasoning(raw.demand_reasoning, Dimension::Demand),
        execution_reasoning: reasoning(raw.execution_reasoning, Dimension::Execution),
    }
}

/// Result of [`decode_completion`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub breakdown: ScoreBreakdown,
    pub path: DecodePath,
}

/// Strict decode, else field recovery, then normalization. Never fails.
pub fn decode_completion(content: &str, neutral: u8) -> Decoded {
    match decode_strict(content) {
        Ok(raw) => Decoded {
            breakdown: normalize(raw, neutral),
            path: DecodePath::Strict,
        },
        Err(e) => {
            tracing::debug!(error = %e, "strict decode failed, recovering fields from text");
            Decoded {
                breakdown: normalize(recover_fields(content), neutral),
                path: DecodePath::Recovered,
            }
        }
    }
}
