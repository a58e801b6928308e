//! Conversation management
//!
//! Owns the chat turn pipeline: validation, content transforms, bounded
//! history and provider invocation.

pub mod content;
pub mod error;
pub mod manager;

pub use content::{render_ai_markdown, sanitize_user_text};
pub use error::{ChatError, StorageOperation};
pub use manager::{CompletedTurn, ConversationManager, TurnState, HISTORY_WINDOW};
