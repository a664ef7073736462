//! SQLite-backed [`ItemStore`] implementation.
//!
//! Dedup lookups are split into parameterized `IN (?, ?, ...)` queries of
//! at most [`LOOKUP_CHUNK_SIZE`] ids, which keeps every statement under
//! SQLite's bound-parameter limit no matter how long the ranked list is.
//! Batch commits run inside one transaction: any failing insert drops the
//! transaction and nothing from the batch becomes visible.

use std::collections::HashSet;

use async_trait::async_trait;
use hn_digest_core::models::Item;
use hn_digest_core::store::ItemStore;
use hn_digest_core::{Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

/// Ids per dedup query. Well below the historic SQLite limit of 999.
pub const LOOKUP_CHUNK_SIZE: usize = 500;

/// SQLite implementation of the [`ItemStore`] trait over the
/// `news_items` table.
pub struct SqliteItemStore {
    pool: SqlitePool,
    chunk_size: usize,
}

impl SqliteItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            chunk_size: LOOKUP_CHUNK_SIZE,
        }
    }

    /// Override the lookup chunk size (minimum 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn find_existing_ids(&self, candidate_ids: &[i64]) -> Result<HashSet<i64>> {
        let mut existing = HashSet::new();

        for chunk in candidate_ids.chunks(self.chunk_size) {
            let sql = format!(
                "SELECT id FROM news_items WHERE id IN ({})",
                placeholders(chunk.len())
            );
            let mut query = sqlx::query_scalar::<_, i64>(&sql);
            for id in chunk {
                query = query.bind(*id);
            }
            let found = query
                .fetch_all(&self.pool)
                .await
                .map_err(|e| Error::persistence(format!("dedup lookup failed: {}", e)))?;
            existing.extend(found);
        }

        debug!(
            candidates = candidate_ids.len(),
            existing = existing.len(),
            "dedup lookup"
        );
        Ok(existing)
    }

    async fn commit_batch(&self, items: &[Item]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::persistence(format!("begin transaction: {}", e)))?;

        for item in items {
            sqlx::query(
                "INSERT INTO news_items (id, created_at, news_title, news_url) VALUES (?, ?, ?, ?)",
            )
            .bind(item.id)
            .bind(item.created_at)
            .bind(&item.title)
            .bind(&item.url)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::persistence(format!("insert item {}: {}", item.id, e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::persistence(format!("commit: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
