use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::message_store::error::Error;

/// Text of the placeholder shown when the conversation is empty
pub const WELCOME_TEXT: &str = "Welcome! Ask me anything.";

/// Id carried by the synthetic welcome message; persisted ids start at 1
pub const SYNTHETIC_ID: i64 = 0;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
            Sender::System => "system",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "ai" => Ok(Sender::Ai),
            "system" => Ok(Sender::System),
            other => Err(Error::ValidationError(format!("Unknown sender '{}'", other))),
        }
    }
}

/// A stored chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Store-assigned, increasing identifier
    pub id: i64,

    pub sender: Sender,

    /// Already transformed by the caller (escaped or rendered HTML)
    pub content: String,

    /// UTC time the message was recorded
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// The placeholder returned for an empty conversation. Never persisted.
    pub fn welcome() -> Self {
        Self {
            id: SYNTHETIC_ID,
            sender: Sender::System,
            content: WELCOME_TEXT.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.id == SYNTHETIC_ID
    }
}

/// Substitute the welcome message for an empty history
pub(crate) fn or_welcome(messages: Vec<Message>) -> Vec<Message> {
    if messages.is_empty() {
        vec![Message::welcome()]
    } else {
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_round_trips_through_str() {
        for sender in [Sender::User, Sender::Ai, Sender::System] {
            assert_eq!(sender.as_str().parse::<Sender>().unwrap(), sender);
        }
        assert!("robot".parse::<Sender>().is_err());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"ai\"");
    }

    #[test]
    fn test_welcome_is_synthetic_system_message() {
        let welcome = Message::welcome();
        assert_eq!(welcome.sender, Sender::System);
        assert_eq!(welcome.content, WELCOME_TEXT);
        assert!(welcome.is_synthetic());
    }

    #[test]
    fn test_or_welcome() {
        assert_eq!(or_welcome(vec![]).len(), 1);

        let msg = Message {
            id: 7,
            sender: Sender::User,
            content: "hi".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(or_welcome(vec![msg.clone()]), vec![msg]);
    }
}
