use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::message_store::{
    error::Result,
    types::{Message, Sender},
};

/// Durable, ordered log of chat turns
///
/// Content transforms are the caller's business; a store saves exactly what
/// it is given. Implementations must keep ids unique and increasing under
/// concurrent appends.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message and return its id. A missing timestamp means now.
    async fn append(
        &self,
        sender: Sender,
        content: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<i64>;

    /// Up to `limit` of the most recent messages, oldest first. An empty
    /// store yields a single synthetic welcome message that is not persisted.
    async fn recent_history(&self, limit: usize) -> Result<Vec<Message>>;

    /// Delete every message atomically and return how many were removed
    async fn clear_all(&self) -> Result<u64>;

    /// Release backend resources at shutdown. Later calls may fail.
    fn close(&self) {}
}
