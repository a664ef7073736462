//! In-memory [`ItemStore`] implementation, used by tests and by dry runs
//! that have no database to read from.
//!
//! Items live in a `BTreeMap` behind `std::sync::RwLock`. A commit stages
//! the whole batch and only publishes it when every id is free, which
//! gives the same all-or-nothing visibility as a database transaction.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Item;

use super::ItemStore;

/// In-memory store for testing.
pub struct InMemoryItemStore {
    items: RwLock<BTreeMap<i64, Item>>,
    /// Fail the next commit after this many rows have been staged.
    fail_commit_after: RwLock<Option<usize>>,
    lookups: AtomicUsize,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            fail_commit_after: RwLock::new(None),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Pre-populate with existing items.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let store = Self::new();
        {
            let mut map = store.items.write().unwrap();
            for item in items {
                map.insert(item.id, item);
            }
        }
        store
    }

    /// Make the next `commit_batch` fail once `rows` rows have been staged.
    pub fn fail_next_commit_after(&self, rows: usize) {
        *self.fail_commit_after.write().unwrap() = Some(rows);
    }

    pub fn ids(&self) -> Vec<i64> {
        self.items.read().unwrap().keys().copied().collect()
    }

    pub fn get(&self, id: i64) -> Option<Item> {
        self.items.read().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `find_existing_ids` calls served.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_existing_ids(&self, candidate_ids: &[i64]) -> Result<HashSet<i64>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let items = self.items.read().unwrap();
        Ok(candidate_ids
            .iter()
            .copied()
            .filter(|id| items.contains_key(id))
            .collect())
    }

    async fn commit_batch(&self, items: &[Item]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        let fail_after = self.fail_commit_after.write().unwrap().take();

        let mut stored = self.items.write().unwrap();
        let mut staged: BTreeMap<i64, Item> = BTreeMap::new();
        for (i, item) in items.iter().enumerate() {
            if fail_after == Some(i) {
                return Err(Error::persistence(format!(
                    "injected failure after {} rows",
                    i
                )));
            }
            if stored.contains_key(&item.id) || staged.contains_key(&item.id) {
                return Err(Error::persistence(format!(
                    "UNIQUE constraint failed: news_items.id ({})",
                    item.id
                )));
            }
            staged.insert(item.id, item.clone());
        }
        stored.extend(staged);
        Ok(())
    }
}
