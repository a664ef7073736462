//! Storage abstraction for ingested items.
//!
//! The [`ItemStore`] trait is the only persistence contract the pipeline
//! needs: a set-membership lookup for dedup and an all-or-nothing batch
//! insert. The binary crate provides the SQLite implementation;
//! [`memory::InMemoryItemStore`] backs tests.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Item;

/// Persistence gateway for news items.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`find_existing_ids`](ItemStore::find_existing_ids) | Which candidates are already stored |
/// | [`commit_batch`](ItemStore::commit_batch) | Insert a batch atomically |
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Return exactly the subset of `candidate_ids` already present.
    ///
    /// Must accept arbitrarily large inputs; backends with parameter
    /// limits split the lookup internally.
    async fn find_existing_ids(&self, candidate_ids: &[i64]) -> Result<HashSet<i64>>;

    /// Insert every item or none of them.
    ///
    /// An empty slice is a no-op.
    async fn commit_batch(&self, items: &[Item]) -> Result<()>;
}
