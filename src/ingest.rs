//! `hn-digest run`: one ingestion pass.
//!
//! Wires the configured filters, the SQLite store, and the HTTP client
//! into [`IngestionPipeline`] and prints a summary. Filters are compiled
//! before any network or database activity so that a bad pattern aborts
//! the run without side effects.
//!
//! A dry run never creates the database file or the schema. Without an
//! initialized database every ranked id counts as new.

use anyhow::{Context, Result};
use hn_digest_core::client::ContentClient;
use hn_digest_core::filter::FilterEngine;
use hn_digest_core::pipeline::{IngestionPipeline, PipelineOptions, RunReport};
use hn_digest_core::store::memory::InMemoryItemStore;
use hn_digest_core::store::ItemStore;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::hn_client::HackerNewsClient;
use crate::migrate;
use crate::sqlite_store::SqliteItemStore;

/// CLI overrides for a run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    pub dry_run: bool,
    pub limit: Option<usize>,
    pub concurrency: Option<usize>,
}

impl IngestOptions {
    fn pipeline_options(&self, config: &Config) -> PipelineOptions {
        PipelineOptions {
            concurrency: self.concurrency.unwrap_or(config.concurrency),
            dry_run: self.dry_run,
            limit: self.limit,
        }
    }
}

pub async fn run_ingest(config: &Config, options: &IngestOptions) -> Result<RunReport> {
    let client = HackerNewsClient::from_config(config)?;
    let report = ingest_with_client(config, &client, options).await?;
    print_report(&report);
    Ok(report)
}

/// Run the pipeline against any [`ContentClient`].
pub async fn ingest_with_client(
    config: &Config,
    client: &dyn ContentClient,
    options: &IngestOptions,
) -> Result<RunReport> {
    let filters =
        FilterEngine::from_config(config.blacklisted_domains.as_slice(), &config.filters)?;
    info!(
        blacklisted = filters.blacklist().len(),
        rules = filters.rules().len(),
        "filters compiled"
    );

    let pipeline_options = options.pipeline_options(config);

    if options.dry_run && !config.db_dsn.exists() {
        info!(db = %config.db_dsn.display(), "no database yet, dry run against an empty store");
        return run_pipeline(client, &InMemoryItemStore::new(), filters, pipeline_options).await;
    }

    let pool = db::connect(config)
        .await
        .with_context(|| format!("Failed to open database: {}", config.db_dsn.display()))?;

    let result = async {
        if !options.dry_run {
            migrate::ensure_schema(&pool).await?;
        } else if !migrate::schema_exists(&pool).await? {
            info!("database has no schema yet, dry run against an empty store");
            return run_pipeline(client, &InMemoryItemStore::new(), filters, pipeline_options)
                .await;
        }
        let store = SqliteItemStore::new(pool.clone());
        run_pipeline(client, &store, filters, pipeline_options).await
    }
    .await;

    pool.close().await;
    result
}

async fn run_pipeline(
    client: &dyn ContentClient,
    store: &dyn ItemStore,
    filters: FilterEngine,
    options: PipelineOptions,
) -> Result<RunReport> {
    let report = IngestionPipeline::new(client, store, filters, options)
        .run()
        .await?;
    Ok(report)
}

fn print_report(report: &RunReport) {
    if report.dry_run {
        println!("run (dry-run)");
    } else {
        println!("run");
    }
    println!("  ranked ids: {}", report.fetched_ids);
    println!("  already stored: {}", report.already_known);
    println!("  new ids: {}", report.new_ids);
    println!("  processed: {}", report.processed);
    println!("  fetch failures: {}", report.fetch_failures);
    println!("  discarded (no url): {}", report.discarded_absent);
    println!("  discarded (blacklisted): {}", report.discarded_blacklisted);
    println!("  discarded (no rule matched): {}", report.discarded_rules);
    if report.dry_run {
        println!("  would commit: {}", report.kept_ids.len());
    } else {
        println!("  committed: {}", report.committed);
    }
    println!("ok");
}
