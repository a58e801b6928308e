//! Provider trait and the adapter that dispatches to it

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use super::{config::ProviderConfig, config::ProviderKind, error::LlmError, types::ConversationTurn};
use crate::llm::gemini::GeminiClient;
use crate::llm::http::build_client;
use crate::llm::local::LocalChatClient;

/// Default whole-request timeout for provider calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and return the reply text
    ///
    /// # Arguments
    /// * `history` - Conversation turns, oldest first, no system turns
    /// * `config` - Target model configuration
    async fn complete(
        &self,
        history: &[ConversationTurn],
        config: &ProviderConfig,
    ) -> Result<String, LlmError>;
}

/// Provider-agnostic entry point: one client per [`ProviderKind`], picked
/// by an exhaustive match on the config's kind
#[derive(Debug, Clone)]
pub struct ProviderAdapter {
    local: LocalChatClient,
    gemini: GeminiClient,
}

impl ProviderAdapter {
    /// Create an adapter whose calls time out after `request_timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(request_timeout: Duration) -> Result<Self, LlmError> {
        let http_client = build_client(request_timeout)?;

        Ok(Self {
            local: LocalChatClient::new(http_client.clone()),
            gemini: GeminiClient::new(http_client),
        })
    }

    fn provider_for(&self, kind: ProviderKind) -> &dyn LlmProvider {
        match kind {
            ProviderKind::LocalChat => &self.local,
            ProviderKind::CloudGenerative => &self.gemini,
        }
    }

    /// Send `history` to the model described by `config`
    ///
    /// Fails with [`LlmError::MissingCredential`] before any network I/O when
    /// the provider kind needs a key and none is configured.
    pub async fn send(
        &self,
        history: &[ConversationTurn],
        config: &ProviderConfig,
    ) -> Result<String, LlmError> {
        if !config.has_required_credential() {
            return Err(LlmError::MissingCredential {
                model_id: config.model_id.clone(),
            });
        }

        info!(
            model = %config.key,
            provider = config.provider.as_str(),
            turns = history.len(),
            "sending conversation to provider"
        );

        let result = self
            .provider_for(config.provider)
            .complete(history, config)
            .await;

        if let Err(e) = &result {
            warn!(model = %config.key, error = %e, "provider call failed");
        }
        result
    }
}
