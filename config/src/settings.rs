//! Runtime settings resolved from environment variables.
//!
//! Call [`Settings::from_env`] once at startup, after [`crate::load_and_apply`]. Tests use
//! [`Settings::from_lookup`] with a map instead of mutating the process environment.

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-5-mini-2025-08-07";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_NEUTRAL_SCORE: u8 = 75;
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787/validate-idea";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// `OPENAI_API_KEY`, passed through untouched; the gateway validates it per request.
    pub openai_api_key: Option<String>,
    /// `OPENAI_BASE_URL`, falling back to `OPENAI_API_BASE`.
    pub openai_base_url: String,
    /// `IDEA_SCORE_MODEL`
    pub model: String,
    /// `IDEA_SCORE_MAX_TOKENS`
    pub max_tokens: u32,
    /// `IDEA_SCORE_NEUTRAL_SCORE`, clamped into 1..=100.
    pub neutral_score: u8,
    /// `IDEA_SCORE_VERBOSE_ERRORS`
    pub verbose_errors: bool,
    /// `IDEA_SCORE_ADDR`
    pub addr: String,
    /// `IDEA_SCORE_GATEWAY_URL`
    pub gateway_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("neutral_score", &self.neutral_score)
            .field("verbose_errors", &self.verbose_errors)
            .field("addr", &self.addr)
            .field("gateway_url", &self.gateway_url)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Empty values count as unset; unparsable numbers
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let parsed = |key: &str| get(key).and_then(|v| v.parse::<i64>().ok());

        Self {
            openai_api_key: lookup("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .or_else(|| get("OPENAI_API_BASE"))
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: get("IDEA_SCORE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: parsed("IDEA_SCORE_MAX_TOKENS")
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_TOKENS),
            neutral_score: parsed("IDEA_SCORE_NEUTRAL_SCORE")
                .map(|n| n.clamp(1, 100) as u8)
                .unwrap_or(DEFAULT_NEUTRAL_SCORE),
            verbose_errors: get("IDEA_SCORE_VERBOSE_ERRORS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            addr: get("IDEA_SCORE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            gateway_url: get("IDEA_SCORE_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        }
    }
}
