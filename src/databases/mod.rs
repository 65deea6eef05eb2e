use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, SqlitePool};
use std::str::FromStr;

pub mod messages;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Open the connection pool, creating the database file if it is missing.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

async fn table_exists(pool: &SqlitePool, table: &str) -> Result<bool> {
    let exists: (bool,) = sqlx::query_as(
        "SELECT EXISTS (
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = $1
        )",
    )
    .bind(table)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to check for table '{}'", table))?;

    Ok(exists.0)
}

/// Make sure the schema is in place. Called on server startup so a fresh
/// checkout works without a separate `initdb` run.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    if !table_exists(pool, "messages").await? {
        log::info!("messages table missing, running schema SQL");
        create_all(pool).await?;
    }
    Ok(())
}

pub async fn create_all(pool: &SqlitePool) -> Result<()> {
    pool.execute(SCHEMA_SQL)
        .await
        .context("Failed to execute schema SQL")?;
    Ok(())
}

/// Destroys every stored message. Administrative use only.
pub async fn drop_all(pool: &SqlitePool) -> Result<()> {
    pool.execute("DROP TABLE IF EXISTS messages")
        .await
        .context("Failed to drop tables")?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // Every `sqlite::memory:` connection is its own database, so the pool
    // must stay at a single connection.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    create_all(&pool).await.expect("failed to create schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.expect("first ensure");
        ensure_schema(&pool).await.expect("second ensure");
        assert!(table_exists(&pool, "messages").await.unwrap());
    }

    #[tokio::test]
    async fn drop_all_removes_the_table() {
        let pool = test_pool().await;
        drop_all(&pool).await.expect("drop");
        assert!(!table_exists(&pool, "messages").await.unwrap());
    }
}
