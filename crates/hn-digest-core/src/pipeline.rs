//! Ingestion pipeline orchestration.
//!
//! One run goes: ranked ids → dedup against the store → fetch each new
//! item → drop items without a url → blacklist → title rules → commit the
//! survivors as a single batch.
//!
//! ```text
//! ContentClient ──ids──▶ ItemStore::find_existing_ids
//!                              │ missing (ranked order)
//!                              ▼
//!                  fetch_item ×N (bounded, ordered)
//!                              │ Outcome per id
//!                              ▼
//!                  FilterEngine ──▶ batch ──▶ ItemStore::commit_batch
//! ```
//!
//! Item fetches may run concurrently, but each one only produces an
//! [`Outcome`]; the batch is assembled afterwards from the ordered outcomes
//! so no worker ever writes to shared state. The store is touched only
//! before and after the fetch phase.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::client::ContentClient;
use crate::error::{Error, Result};
use crate::filter::{FilterEngine, Verdict};
use crate::models::Item;
use crate::store::ItemStore;

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Number of item fetches in flight at once. `1` is strictly sequential.
    pub concurrency: usize,
    /// Do everything except the final commit.
    pub dry_run: bool,
    /// Process at most this many new ids (highest ranked first).
    pub limit: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dry_run: false,
            limit: None,
        }
    }
}

/// What happened to one missing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Keep(Item),
    FetchFailed,
    /// `null` body, or no usable url.
    Absent,
    Blacklisted,
    NoRuleMatched,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched_ids: usize,
    pub already_known: usize,
    pub new_ids: usize,
    pub processed: usize,
    pub fetch_failures: usize,
    pub discarded_absent: usize,
    pub discarded_blacklisted: usize,
    pub discarded_rules: usize,
    pub committed: usize,
    pub dry_run: bool,
    /// Ids of the kept items, in ranked order.
    pub kept_ids: Vec<i64>,
}

/// `ids - existing`, in the order of `ids`, first occurrence only.
pub fn missing_ids(ids: &[i64], existing: &HashSet<i64>) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .copied()
        .filter(|id| !existing.contains(id) && seen.insert(*id))
        .collect()
}

pub struct IngestionPipeline<'a> {
    client: &'a dyn ContentClient,
    store: &'a dyn ItemStore,
    filters: FilterEngine,
    options: PipelineOptions,
}

impl<'a> IngestionPipeline<'a> {
    pub fn new(
        client: &'a dyn ContentClient,
        store: &'a dyn ItemStore,
        filters: FilterEngine,
        options: PipelineOptions,
    ) -> Self {
        Self {
            client,
            store,
            filters,
            options,
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        if self.options.concurrency == 0 {
            return Err(Error::configuration("concurrency must be >= 1"));
        }

        let mut report = RunReport {
            dry_run: self.options.dry_run,
            ..Default::default()
        };

        let ids = self.client.fetch_top_ids().await?;
        report.fetched_ids = ids.len();
        info!(count = ids.len(), "fetched ranked ids");

        let existing = self.store.find_existing_ids(&ids).await?;
        let mut missing = missing_ids(&ids, &existing);
        report.already_known = existing.len();
        report.new_ids = missing.len();
        info!(
            known = existing.len(),
            new = missing.len(),
            "deduplicated against store"
        );

        if let Some(limit) = self.options.limit {
            missing.truncate(limit);
        }

        let outcomes: Vec<(i64, Outcome)> = stream::iter(missing)
            .map(|id| async move { (id, self.process(id).await) })
            .buffered(self.options.concurrency)
            .collect()
            .await;

        let mut batch = Vec::new();
        for (id, outcome) in outcomes {
            report.processed += 1;
            match outcome {
                Outcome::Keep(item) => {
                    report.kept_ids.push(id);
                    batch.push(item);
                }
                Outcome::FetchFailed => report.fetch_failures += 1,
                Outcome::Absent => report.discarded_absent += 1,
                Outcome::Blacklisted => report.discarded_blacklisted += 1,
                Outcome::NoRuleMatched => report.discarded_rules += 1,
            }
        }

        if self.options.dry_run {
            info!(kept = batch.len(), "dry run, skipping commit");
            return Ok(report);
        }

        self.store.commit_batch(&batch).await?;
        report.committed = batch.len();
        info!(committed = batch.len(), "batch committed");

        Ok(report)
    }

    /// Fetch and classify one id. Never fails: errors, and bodies whose
    /// `id` is not the requested one, become [`Outcome::FetchFailed`].
    async fn process(&self, id: i64) -> Outcome {
        let payload = match self.client.fetch_item(id).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(id, "item body is null");
                return Outcome::Absent;
            }
            Err(e) => {
                warn!(id, error = %e, "skipping item after fetch failure");
                return Outcome::FetchFailed;
            }
        };

        if payload.id != id {
            warn!(id, payload_id = payload.id, "skipping item with mismatched id");
            return Outcome::FetchFailed;
        }

        let Some(item) = Item::from_payload(payload) else {
            debug!(id, "item has no url");
            return Outcome::Absent;
        };

        match self.filters.check(&item) {
            Verdict::Keep => Outcome::Keep(item),
            Verdict::Blacklisted => {
                debug!(id, url = %item.url, "blacklisted domain");
                Outcome::Blacklisted
            }
            Verdict::NoRuleMatched => {
                debug!(id, title = %item.title, "no filter rule matched");
                Outcome::NoRuleMatched
            }
        }
    }
}
