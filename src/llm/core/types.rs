//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use crate::message_store::{Message, Sender};

/// Role of a turn as seen by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// Human input
    User,
    /// Model output
    Assistant,
}

/// A provider-agnostic conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }

    /// Convert stored messages into turns, dropping `system` messages and
    /// keeping the order of the rest
    pub fn from_history(messages: &[Message]) -> Vec<Self> {
        messages
            .iter()
            .filter_map(|msg| match msg.sender {
                Sender::User => Some(Self::user(msg.content.clone())),
                Sender::Ai => Some(Self::assistant(msg.content.clone())),
                Sender::System => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(id: i64, sender: Sender, content: &str) -> Message {
        Message {
            id,
            sender,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_from_history_drops_system_and_keeps_order() {
        let history = vec![
            message(0, Sender::System, "Welcome! Ask me anything."),
            message(1, Sender::User, "hi"),
            message(2, Sender::Ai, "<p>hello</p>\n"),
            message(3, Sender::User, "again"),
        ];

        let turns = ConversationTurn::from_history(&history);
        assert_eq!(
            turns,
            vec![
                ConversationTurn::user("hi"),
                ConversationTurn::assistant("<p>hello</p>\n"),
                ConversationTurn::user("again"),
            ]
        );
    }

    #[test]
    fn test_from_history_of_only_welcome_is_empty() {
        let history = vec![message(0, Sender::System, "Welcome! Ask me anything.")];
        assert!(ConversationTurn::from_history(&history).is_empty());
    }

    #[test]
    fn test_turn_role_serialization() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&TurnRole::Assistant).unwrap(), "\"assistant\"");
    }
}
