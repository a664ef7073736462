use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// `hn-digest init`: create the database file and schema.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    ensure_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// True once `news_items` has been created. Read-only.
pub async fn schema_exists(pool: &SqlitePool) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'news_items'",
    )
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Create tables and indexes if missing. Safe to call on every run.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS news_items (
            id INTEGER PRIMARY KEY,
            created_at INTEGER NOT NULL,
            news_title TEXT NOT NULL,
            news_url TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Purge scans by age
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_news_items_created_at ON news_items(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}
