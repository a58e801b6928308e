//! Errors surfaced by the conversation manager

use thiserror::Error;

use crate::llm::LlmError;
use crate::message_store;

/// Everything a chat turn or history operation can fail with
#[derive(Debug, Error)]
pub enum ChatError {
    /// The message was empty or whitespace only
    #[error("Empty message")]
    EmptyMessage,

    /// The requested model key is not in the registry
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// The selected model needs an API key that is not configured
    #[error("Missing API key for model {model_id}")]
    MissingCredential { model_id: String },

    /// The provider call failed; the user turn is already stored
    #[error(transparent)]
    Provider(#[from] LlmError),

    /// Saving or loading the conversation failed
    #[error("Storage error while trying to {operation}: {source}")]
    Storage {
        operation: StorageOperation,
        #[source]
        source: message_store::Error,
    },
}

/// What the store was doing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Save,
    Load,
    Clear,
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StorageOperation::Save => "save the conversation",
            StorageOperation::Load => "load the conversation",
            StorageOperation::Clear => "clear history",
        })
    }
}

impl ChatError {
    pub(crate) fn storage(operation: StorageOperation) -> impl FnOnce(message_store::Error) -> Self {
        move |source| ChatError::Storage { operation, source }
    }

    /// Whether the failure is the caller's input (as opposed to a backend)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ChatError::EmptyMessage | ChatError::UnknownModel(_) | ChatError::MissingCredential { .. }
        )
    }

    /// Human-readable message mapped 1:1 from the error kind
    pub fn user_message(&self) -> String {
        match self {
            ChatError::EmptyMessage => "Message cannot be empty.".to_string(),
            ChatError::UnknownModel(_) => "Invalid AI model selected.".to_string(),
            ChatError::MissingCredential { model_id } => {
                format!("API Key for {} is missing.", model_id)
            }
            ChatError::Provider(err) => err.user_message(),
            ChatError::Storage {
                operation: StorageOperation::Clear,
                ..
            } => "Failed to clear history.".to_string(),
            ChatError::Storage {
                operation: StorageOperation::Load,
                ..
            } => "Failed to load the conversation.".to_string(),
            ChatError::Storage {
                operation: StorageOperation::Save,
                ..
            } => "Failed to save the conversation.".to_string(),
        }
    }
}
