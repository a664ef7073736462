//! Database statistics.
//!
//! A quick look at what has been ingested so far: item count and the
//! oldest and newest story times.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::migrate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStats {
    pub total: i64,
    pub oldest: Option<i64>,
    pub newest: Option<i64>,
}

pub async fn run_stats(config: &Config) -> Result<ItemStats> {
    let pool = db::connect(config).await?;
    let result = async {
        migrate::ensure_schema(&pool).await?;
        item_stats(&pool).await
    }
    .await;
    pool.close().await;
    let stats = result?;

    let db_size = std::fs::metadata(&config.db_dsn)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("hn-digest — Database Stats");
    println!("==========================");
    println!();
    println!("  Database:    {}", config.db_dsn.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!("  Items:       {}", stats.total);
    println!("  Oldest:      {}", format_ts(stats.oldest));
    println!("  Newest:      {}", format_ts(stats.newest));

    Ok(stats)
}

pub async fn item_stats(pool: &SqlitePool) -> Result<ItemStats> {
    let row = sqlx::query("SELECT COUNT(*), MIN(created_at), MAX(created_at) FROM news_items")
        .fetch_one(pool)
        .await?;

    Ok(ItemStats {
        total: row.try_get(0)?,
        oldest: row.try_get(1)?,
        newest: row.try_get(2)?,
    })
}

fn format_ts(ts: Option<i64>) -> String {
    ts.and_then(|t| chrono::DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
