// Request and response bodies for the HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::CompletedTurn;
use crate::llm::ProviderRegistry;
use crate::message_store::{Message, Sender};

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub llm_model: Option<String>,
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageView {
    pub id: i64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Message> for MessageView {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            sender: msg.sender,
            content: msg.content,
            timestamp: msg.timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub user_message_id: i64,
    pub ai_message_id: i64,
    pub model: String,
    pub reply: String,
}

impl From<CompletedTurn> for ChatResponse {
    fn from(turn: CompletedTurn) -> Self {
        Self {
            user_message_id: turn.user_message_id,
            ai_message_id: turn.ai_message_id,
            model: turn.model_key,
            reply: turn.reply_html,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearResponse {
    pub cleared: bool,
    pub removed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelOption {
    pub key: String,
    pub label: String,
    pub model_id: String,
    pub provider: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<ModelOption>,
}

impl From<&ProviderRegistry> for ModelsResponse {
    fn from(registry: &ProviderRegistry) -> Self {
        Self {
            default_model: registry.default_key().to_string(),
            models: registry
                .iter()
                .map(|config| ModelOption {
                    key: config.key.clone(),
                    label: config.display_label(),
                    model_id: config.model_id.clone(),
                    provider: config.provider.as_str().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
