use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;

use crate::message_store::{error::Result, types::Sender};

/// Insert one message and return its id
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `sender` - Who produced the message
/// * `content` - Content exactly as it should be stored
/// * `timestamp` - Time of the message; the current time when `None`
///
/// # Errors
///
/// * `Error::PoolError` - If no connection could be obtained
/// * `Error::DatabaseError` - For SQL errors
pub async fn write_message(
    pool: &Pool,
    sender: Sender,
    content: &str,
    timestamp: Option<DateTime<Utc>>,
) -> Result<i64> {
    let conn = pool.get().await?;
    let timestamp = timestamp.unwrap_or_else(Utc::now);

    let row = conn
        .query_one(
            "INSERT INTO messages (sender, content, timestamp) VALUES ($1, $2, $3) RETURNING id",
            &[&sender.as_str(), &content, &timestamp],
        )
        .await?;

    Ok(row.get(0))
}
