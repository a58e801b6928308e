//! Turn-taking between the store and the provider adapter

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::conversation::content::{render_ai_markdown, sanitize_user_text};
use crate::conversation::error::{ChatError, StorageOperation};
use crate::llm::{ConversationTurn, ProviderAdapter, ProviderConfig, ProviderRegistry};
use crate::message_store::{Message, MessageStore, Sender};

/// Number of most recent messages sent to a provider as context
pub const HISTORY_WINDOW: usize = 50;

/// Progress of a single chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    UserRecorded,
    ProviderInvoked,
    Completed,
    Failed,
}

/// Result of a successful turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTurn {
    pub user_message_id: i64,
    pub ai_message_id: i64,
    /// Reply as stored (rendered HTML)
    pub reply_html: String,
    /// Registry key of the model that answered
    pub model_key: String,
}

/// Orchestrates chat turns over one shared conversation
///
/// The store handle and the registry are injected at construction and never
/// change afterwards. Appends are individual store mutations; nothing rolls
/// back a user turn when the provider call fails.
pub struct ConversationManager {
    store: Arc<dyn MessageStore>,
    registry: Arc<ProviderRegistry>,
    adapter: ProviderAdapter,
    history_window: usize,
}

impl ConversationManager {
    pub fn new(
        store: Arc<dyn MessageStore>,
        registry: Arc<ProviderRegistry>,
        adapter: ProviderAdapter,
    ) -> Self {
        Self {
            store,
            registry,
            adapter,
            history_window: HISTORY_WINDOW,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Run one chat turn: record the user message, ask the model, record the
    /// reply.
    ///
    /// `model_key` of `None` selects the registry default.
    ///
    /// # Errors
    ///
    /// Validation failures (`EmptyMessage`, `UnknownModel`,
    /// `MissingCredential`) happen before anything is stored. A `Provider`
    /// error means the user turn was stored and the AI turn was not.
    pub async fn send_message(
        &self,
        text: &str,
        model_key: Option<&str>,
    ) -> Result<CompletedTurn, ChatError> {
        let mut state = TurnState::Idle;

        let result = self.run_turn(text, model_key, &mut state).await;

        match &result {
            Ok(turn) => {
                transition(&mut state, TurnState::Completed);
                info!(
                    model = %turn.model_key,
                    user_message_id = turn.user_message_id,
                    ai_message_id = turn.ai_message_id,
                    "chat turn completed"
                );
            }
            Err(err) => {
                let reached = state;
                transition(&mut state, TurnState::Failed);
                if err.is_validation() {
                    warn!(error = %err, "chat turn rejected");
                } else {
                    error!(error = %err, reached = ?reached, "chat turn failed");
                }
            }
        }

        result
    }

    async fn run_turn(
        &self,
        text: &str,
        model_key: Option<&str>,
        state: &mut TurnState,
    ) -> Result<CompletedTurn, ChatError> {
        // Idle -> UserRecorded
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let config = self.resolve_model(model_key)?;
        if !config.has_required_credential() {
            return Err(ChatError::MissingCredential {
                model_id: config.model_id.clone(),
            });
        }

        let user_message_id = self
            .store
            .append(Sender::User, &sanitize_user_text(text), None)
            .await
            .map_err(ChatError::storage(StorageOperation::Save))?;
        transition(state, TurnState::UserRecorded);

        // UserRecorded -> ProviderInvoked
        let history = self
            .store
            .recent_history(self.history_window)
            .await
            .map_err(ChatError::storage(StorageOperation::Load))?;
        let turns = ConversationTurn::from_history(&history);

        transition(state, TurnState::ProviderInvoked);
        let reply = self.adapter.send(&turns, config).await?;

        // ProviderInvoked -> Completed
        let reply_html = render_ai_markdown(&reply);
        let ai_message_id = self
            .store
            .append(Sender::Ai, &reply_html, None)
            .await
            .map_err(ChatError::storage(StorageOperation::Save))?;

        Ok(CompletedTurn {
            user_message_id,
            ai_message_id,
            reply_html,
            model_key: config.key.clone(),
        })
    }

    fn resolve_model(&self, model_key: Option<&str>) -> Result<&ProviderConfig, ChatError> {
        let key = model_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.registry.default_key());

        self.registry
            .get(key)
            .ok_or_else(|| ChatError::UnknownModel(key.to_string()))
    }

    /// The most recent messages for display, oldest first
    pub async fn history(&self) -> Result<Vec<Message>, ChatError> {
        self.store
            .recent_history(self.history_window)
            .await
            .map_err(ChatError::storage(StorageOperation::Load))
    }

    /// Remove the whole conversation
    pub async fn clear_history(&self) -> Result<u64, ChatError> {
        match self.store.clear_all().await {
            Ok(removed) => {
                info!(removed, "chat history cleared");
                Ok(removed)
            }
            Err(e) => {
                error!(error = %e, "failed to clear chat history");
                Err(ChatError::storage(StorageOperation::Clear)(e))
            }
        }
    }
}

fn transition(state: &mut TurnState, next: TurnState) {
    debug!(from = ?*state, to = ?next, "turn state");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ProviderKind, DEFAULT_REQUEST_TIMEOUT};
    use crate::message_store::MemoryMessageStore;

    fn manager_with(store: Arc<MemoryMessageStore>) -> ConversationManager {
        let local = ProviderConfig::new(
            "local",
            "http://127.0.0.1:1/v1/chat/completions",
            "zephyr",
            ProviderKind::LocalChat,
        )
        .unwrap();
        let cloud = ProviderConfig::new(
            "cloud",
            "http://127.0.0.1:1/v1beta/models/gemini-2.5-flash:generateContent",
            "gemini-2.5-flash",
            ProviderKind::CloudGenerative,
        )
        .unwrap();
        let registry = ProviderRegistry::new(vec![local, cloud], "local").unwrap();

        ConversationManager::new(
            store,
            Arc::new(registry),
            ProviderAdapter::new(DEFAULT_REQUEST_TIMEOUT).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_whitespace_message_is_rejected_without_writes() {
        let store = Arc::new(MemoryMessageStore::new());
        let manager = manager_with(store.clone());

        for text in ["", "   ", "\n\t "] {
            let err = manager.send_message(text, None).await.unwrap_err();
            assert!(matches!(err, ChatError::EmptyMessage));
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_model_is_rejected_without_writes() {
        let store = Arc::new(MemoryMessageStore::new());
        let manager = manager_with(store.clone());

        let err = manager.send_message("hi", Some("gpt-17")).await.unwrap_err();
        assert!(matches!(err, ChatError::UnknownModel(ref key) if key == "gpt-17"));
        assert_eq!(err.user_message(), "Invalid AI model selected.");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_credential_is_rejected_without_writes() {
        let store = Arc::new(MemoryMessageStore::new());
        let manager = manager_with(store.clone());

        let err = manager.send_message("hi", Some("cloud")).await.unwrap_err();
        assert!(matches!(err, ChatError::MissingCredential { .. }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_connection_failure_keeps_only_user_turn() {
        let store = Arc::new(MemoryMessageStore::new());
        let manager = manager_with(store.clone());

        let err = manager.send_message("<b>hi", None).await.unwrap_err();
        assert!(matches!(err, ChatError::Provider(crate::llm::LlmError::ConnectionError { .. })));
        assert!(err
            .user_message()
            .starts_with("Failed to connect to the AI model at http://127.0.0.1:1/"));

        let stored = store.all().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].sender, Sender::User);
        assert_eq!(stored[0].content, "&lt;b&gt;hi");
    }

    #[tokio::test]
    async fn test_clear_history() {
        let store = Arc::new(MemoryMessageStore::new());
        store.append(Sender::User, "hi", None).await.unwrap();
        let manager = manager_with(store.clone());

        assert_eq!(manager.clear_history().await.unwrap(), 1);
        let history = manager.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_synthetic());
    }
}
