use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::message_store::{
    error::Result,
    store::MessageStore,
    types::{or_welcome, Message, Sender},
};

#[derive(Default)]
struct Inner {
    last_id: i64,
    messages: Vec<Message>,
}

/// Process-local message store. Not durable; used for development runs and
/// tests.
#[derive(Default)]
pub struct MemoryMessageStore {
    inner: Mutex<Inner>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted messages
    pub async fn len(&self) -> usize {
        self.inner.lock().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every persisted message in insertion order
    pub async fn all(&self) -> Vec<Message> {
        self.inner.lock().await.messages.clone()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(
        &self,
        sender: Sender,
        content: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<i64> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let id = inner.last_id;

        inner.messages.push(Message {
            id,
            sender,
            content: content.to_string(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        });

        Ok(id)
    }

    async fn recent_history(&self, limit: usize) -> Result<Vec<Message>> {
        let inner = self.inner.lock().await;

        // Newest first, take the window, then flip back to oldest first
        let mut recent = inner.messages.clone();
        recent.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        recent.truncate(limit);
        recent.reverse();

        Ok(or_welcome(recent))
    }

    async fn clear_all(&self) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let removed = inner.messages.len() as u64;
        inner.messages.clear();
        Ok(removed)
    }
}
