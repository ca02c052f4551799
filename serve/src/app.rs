//! Shared server state: one stateless [`Gateway`] behind an `Arc`, cloned per request.

use std::sync::Arc;

use config::Settings;
use scoring::{ChatOpenAI, CompletionClient, Gateway, GatewayConfig, MIN_IDEA_CHARS};

#[derive(Clone)]
pub struct AppState {
    pub(crate) gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Gateway over the OpenAI client, configured from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let client: Arc<dyn CompletionClient> =
            Arc::new(ChatOpenAI::new(settings.openai_base_url.clone()));
        Self::with_client(settings, client)
    }

    /// Same as [`AppState::from_settings`] with a caller-provided completion client.
    pub fn with_client(settings: &Settings, client: Arc<dyn CompletionClient>) -> Self {
        let config = GatewayConfig {
            model: settings.model.clone(),
            max_completion_tokens: settings.max_tokens,
            neutral_score: settings.neutral_score,
            verbose_errors: settings.verbose_errors,
            min_idea_chars: MIN_IDEA_CHARS,
        };
        Self::new(Gateway::new(
            config,
            settings.openai_api_key.clone(),
            client,
        ))
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}
