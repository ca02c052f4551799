//! Score model: the three scored dimensions, the breakdown returned to clients, and clamping.
//!
//! Every numeric score that leaves this crate has passed through [`clamp_score`], so a
//! [`ScoreBreakdown`] always holds integers in `[SCORE_MIN, SCORE_MAX]`.

use serde::{Deserialize, Serialize};

/// Lowest score a dimension can carry.
pub const SCORE_MIN: u8 = 1;
/// Highest score a dimension can carry.
pub const SCORE_MAX: u8 = 100;

/// Score substituted when a dimension cannot be read from the completion.
///
/// The live scoring handler has always used 75; an older mock-only variant used 50. The value is
/// configurable (`IDEA_SCORE_NEUTRAL_SCORE`) so deployments can pick either explicitly.
pub const DEFAULT_NEUTRAL_SCORE: u8 = 75;

/// One of the three scored dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    Profitability,
    Demand,
    Execution,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Dimension; 3] = [
        Dimension::Profitability,
        Dimension::Demand,
        Dimension::Execution,
    ];

    /// JSON field name of the numeric score.
    pub fn field(self) -> &'static str {
        match self {
            Dimension::Profitability => "profitability",
            Dimension::Demand => "demand",
            Dimension::Execution => "execution",
        }
    }

    /// Label shown next to the gauge.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Profitability => "Profitability",
            Dimension::Demand => "Market Demand",
            Dimension::Execution => "Ease of Execution",
        }
    }

    /// Heading of the reasoning card.
    pub fn analysis_title(self) -> &'static str {
        match self {
            Dimension::Profitability => "Profitability Analysis",
            Dimension::Demand => "Market Demand",
            Dimension::Execution => "Execution Difficulty",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// Scores and reasoning for one idea. This is the 200 body of the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub profitability: u8,
    pub demand: u8,
    pub execution: u8,
    pub profitability_reasoning: String,
    pub demand_reasoning: String,
    pub execution_reasoning: String,
}

impl ScoreBreakdown {
    pub fn score(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Profitability => self.profitability,
            Dimension::Demand => self.demand,
            Dimension::Execution => self.execution,
        }
    }

    pub fn reasoning(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Profitability => &self.profitability_reasoning,
            Dimension::Demand => &self.demand_reasoning,
            Dimension::Execution => &self.execution_reasoning,
        }
    }

    /// Re-clamps all three scores. Used on breakdowns received over the wire.
    pub fn clamped(mut self, neutral: u8) -> Self {
        self.profitability = clamp_score(Some(f64::from(self.profitability)), neutral);
        self.demand = clamp_score(Some(f64::from(self.demand)), neutral);
        self.execution = clamp_score(Some(f64::from(self.execution)), neutral);
        self
    }
}

/// Clamps a raw score into `[SCORE_MIN, SCORE_MAX]`.
///
/// Absent or non-finite values map to `neutral` (itself clamped). Fractional values round to the
/// nearest integer first, so `0.4` becomes 1 and `99.6` becomes 100.
pub fn clamp_score(value: Option<f64>, neutral: u8) -> u8 {
    let neutral = neutral.clamp(SCORE_MIN, SCORE_MAX);
    match value {
        Some(v) if v.is_finite() => {
            v.round().clamp(f64::from(SCORE_MIN), f64::from(SCORE_MAX)) as u8
        }
        _ => neutral,
    }
}
