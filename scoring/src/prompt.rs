//! Fixed grading rubric and the per-request user instruction.

use crate::llm::{CompletionRequest, Message};

/// System instruction: defines the three dimensions and the exact JSON shape to return.
pub const SYSTEM_PROMPT: &str = r#"You are an expert business analyst specializing in startup validation. Analyze the given business idea and provide scores from 1-100 for three key areas: profitability, market demand, and execution difficulty.

For each score, provide specific reasoning based on:
- Profitability: Revenue potential, monetization models, pricing power, cost structure
- Demand: Market size, target audience, problem urgency, competitive landscape
- Execution: Technical complexity, resource requirements, regulatory barriers, time to market

Return your analysis as a JSON object with this exact structure:
{
  "profitability": number (1-100),
  "demand": number (1-100),
  "execution": number (1-100),
  "profitabilityReasoning": "specific reasoning for profitability score",
  "demandReasoning": "specific reasoning for demand score",
  "executionReasoning": "specific reasoning for execution score"
}

Be honest and critical in your assessment. Consider real market conditions and provide actionable insights."#;

/// User instruction embedding the idea text as submitted.
pub fn user_instruction(idea: &str) -> String {
    format!("Analyze this business idea: {}", idea)
}

/// System + user messages for one scoring call.
pub fn build_request(model: &str, max_completion_tokens: u32, idea: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(user_instruction(idea)),
        ],
        max_completion_tokens,
    }
}
