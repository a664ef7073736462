//! `hn-digest purge`: retention maintenance.
//!
//! Deletes items whose `created_at` is older than `purge_after_days`. Kept
//! separate from `run` so ingestion never removes rows.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::migrate;

const SECS_PER_DAY: i64 = 86_400;

pub async fn run_purge(config: &Config, days: Option<u32>, dry_run: bool) -> Result<u64> {
    let days = days.unwrap_or(config.purge_after_days);
    if days == 0 {
        println!("purge disabled (purge_after_days = 0)");
        return Ok(0);
    }

    let cutoff = Utc::now().timestamp() - i64::from(days) * SECS_PER_DAY;

    let pool = db::connect(config).await?;
    let result = async {
        migrate::ensure_schema(&pool).await?;
        purge_older_than(&pool, cutoff, dry_run).await
    }
    .await;
    pool.close().await;
    let affected = result?;

    if dry_run {
        println!("purge (dry-run)");
        println!("  would delete: {}", affected);
    } else {
        println!("purge");
        println!("  deleted: {}", affected);
    }
    println!("  cutoff: {} ({} days)", cutoff, days);
    println!("ok");
    Ok(affected)
}

/// Delete (or count, when `dry_run`) rows created strictly before `cutoff`.
pub async fn purge_older_than(pool: &SqlitePool, cutoff: i64, dry_run: bool) -> Result<u64> {
    if dry_run {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news_items WHERE created_at < ?")
            .bind(cutoff)
            .fetch_one(pool)
            .await?;
        return Ok(count as u64);
    }

    let result = sqlx::query("DELETE FROM news_items WHERE created_at < ?")
        .bind(cutoff)
        .execute(pool)
        .await?;
    info!(deleted = result.rows_affected(), cutoff, "purged old items");
    Ok(result.rows_affected())
}
