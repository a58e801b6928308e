use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::message_store::{
    error::{Error, Result},
    types::{Message, Sender},
};

/// Select the `limit` most recent messages, then return them oldest first.
///
/// Ordering ties on timestamp are broken by id so the result is stable.
const RECENT_SQL: &str = "
SELECT id, sender, content, timestamp FROM (
    SELECT id, sender, content, timestamp
    FROM messages
    ORDER BY timestamp DESC, id DESC
    LIMIT $1
) recent
ORDER BY timestamp ASC, id ASC";

/// Retrieve up to `limit` of the most recent messages in chronological order
///
/// Does not synthesize the welcome message; an empty table yields an empty
/// vector.
pub async fn get_recent_messages(pool: &Pool, limit: usize) -> Result<Vec<Message>> {
    let limit = i64::try_from(limit)
        .map_err(|_| Error::ValidationError(format!("History limit {} is too large", limit)))?;

    let conn = pool.get().await?;
    let rows = conn.query(RECENT_SQL, &[&limit]).await?;

    rows.iter().map(row_to_message).collect()
}

fn row_to_message(row: &Row) -> Result<Message> {
    let sender: String = row.try_get("sender")?;
    let timestamp: DateTime<Utc> = row.try_get("timestamp")?;

    Ok(Message {
        id: row.try_get("id")?,
        sender: sender.parse::<Sender>()?,
        content: row.try_get("content")?,
        timestamp,
    })
}
