use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// A stored message. Records are immutable once created; there is no
/// update or delete path outside the administrative commands.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// Insert a message and return the persisted row, id included.
/// `timestamp` falls back to the current time when not supplied.
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    body: &str,
    timestamp: Option<DateTime<Utc>>,
) -> Result<Message, sqlx::Error> {
    let timestamp = timestamp.unwrap_or_else(Utc::now);

    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (name, body, timestamp)
        VALUES ($1, $2, $3)
        RETURNING id, name, body, timestamp
        "#,
    )
    .bind(name)
    .bind(body)
    .bind(timestamp)
    .fetch_one(pool)
    .await
}

/// Every stored message, most recent first.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        SELECT id, name, body, timestamp
        FROM messages
        ORDER BY timestamp DESC
        "#,
    )
    .fetch_all(pool)
    .await
}
