use deadpool_postgres::Pool;

use crate::message_store::error::Result;

/// DDL for the messages table; safe to run on every startup
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS messages (
    id BIGSERIAL PRIMARY KEY,
    sender TEXT NOT NULL CHECK (sender IN ('user', 'ai', 'system')),
    content TEXT NOT NULL,
    timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS messages_timestamp_id_idx ON messages (timestamp, id);
";

/// Create the messages table and its ordering index if they are missing
pub async fn ensure_schema(pool: &Pool) -> Result<()> {
    let conn = pool.get().await?;
    conn.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}
