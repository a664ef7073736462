//! Configuration file parsing and validation.
//!
//! The file is JSON by default (`./config.json`); a `.toml` extension is
//! parsed as TOML with the same keys.
//!
//! ```json
//! {
//!   "api_base_url": "https://hacker-news.firebaseio.com/v0/",
//!   "purge_after_days": 30,
//!   "db_dsn": "./data/hn.sqlite",
//!   "blacklisted_domains": ["example.com"],
//!   "filters": [{ "title": "Rust", "value": "(?i)\\brust\\b" }],
//!   "email_to": "me@example.org",
//!   "smtp": { "host": "smtp.example.org", "port": 587 }
//! }
//! ```
//!
//! `email_to` and `smtp` are carried for the digest mailer and are not
//! used by ingestion.

use anyhow::{bail, Context, Result};
use hn_digest_core::filter::FilterPattern;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api_base_url: String,
    #[serde(default)]
    pub purge_after_days: u32,
    pub db_dsn: PathBuf,
    #[serde(default)]
    pub blacklisted_domains: Vec<String>,
    #[serde(default)]
    pub filters: Vec<FilterPattern>,
    #[serde(default)]
    pub email_to: Option<String>,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SmtpConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default)]
    pub use_ssl: bool,
}

fn default_concurrency() -> usize {
    1
}
fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// The API base with a guaranteed trailing `/`, so relative paths
    /// like `item/1.json` join under it instead of replacing its last
    /// segment.
    pub fn api_base(&self) -> Result<Url> {
        let mut base = self.api_base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).with_context(|| format!("Invalid api_base_url: {}", self.api_base_url))
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content).with_context(|| "Failed to parse config file")?,
        _ => serde_json::from_str(&content).with_context(|| "Failed to parse config file")?,
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.api_base_url.trim().is_empty() {
        bail!("api_base_url must not be empty");
    }
    let base = config.api_base()?;
    if !matches!(base.scheme(), "http" | "https") {
        bail!("api_base_url must be http or https, got '{}'", base.scheme());
    }

    if config.db_dsn.as_os_str().is_empty() {
        bail!("db_dsn must not be empty");
    }

    if config.concurrency == 0 {
        bail!("concurrency must be >= 1");
    }

    if config.request_timeout_secs == 0 {
        bail!("request_timeout_secs must be >= 1");
    }

    Ok(())
}
