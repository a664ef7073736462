//! # hn-digest CLI
//!
//! ```bash
//! hn-digest --config ./config.json <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hn-digest init` | Create the SQLite database and schema |
//! | `hn-digest run` | Ingest new top stories |
//! | `hn-digest purge` | Delete stories older than the retention window |
//! | `hn-digest stats` | Show what is stored |
//!
//! Logs go to stderr and honour `RUST_LOG`; command summaries go to stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use hn_digest::config;
use hn_digest::ingest::{self, IngestOptions};
use hn_digest::migrate;
use hn_digest::purge;
use hn_digest::stats;

/// hn-digest — collect new Hacker News stories for a digest.
#[derive(Parser)]
#[command(name = "hn-digest", version, about)]
struct Cli {
    /// Path to configuration file (JSON, or TOML with a `.toml` extension).
    #[arg(long, global = true, default_value = "./config.json")]
    config: PathBuf,

    /// Log at debug level for hn-digest crates.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and `news_items` table. Idempotent.
    Init,

    /// Fetch top stories and store the new ones that pass the filters.
    Run {
        /// Fetch and filter without storing anything. Never creates the
        /// database or its schema.
        #[arg(long)]
        dry_run: bool,

        /// Process at most this many new stories.
        #[arg(long)]
        limit: Option<usize>,

        /// Override the number of concurrent item fetches.
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Delete stories older than the retention window.
    Purge {
        /// Override `purge_after_days` (0 disables).
        #[arg(long)]
        days: Option<u32>,

        /// Count matching stories without deleting them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show item count and time range.
    Stats,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,hn_digest=debug,hn_digest_core=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Run {
            dry_run,
            limit,
            concurrency,
        } => {
            let options = IngestOptions {
                dry_run,
                limit,
                concurrency,
            };
            ingest::run_ingest(&cfg, &options).await?;
        }
        Commands::Purge { days, dry_run } => {
            purge::run_purge(&cfg, days, dry_run).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
