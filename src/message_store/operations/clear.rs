use deadpool_postgres::Pool;

use crate::message_store::error::Result;

/// Delete every message in one transaction and return how many were removed
pub async fn clear_messages(pool: &Pool) -> Result<u64> {
    let mut conn = pool.get().await?;
    let txn = conn.transaction().await?;

    let removed = txn.execute("DELETE FROM messages", &[]).await?;

    txn.commit().await?;
    Ok(removed)
}
