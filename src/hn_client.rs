//! HTTP [`ContentClient`] for the Hacker News Firebase API.
//!
//! - `GET {base}topstories.json` → `[i64]`
//! - `GET {base}item/{id}.json` → item object or `null`
//!
//! No retries: a failed id list aborts the run, a failed item is skipped
//! by the pipeline.

use std::time::Duration;

use async_trait::async_trait;
use hn_digest_core::client::ContentClient;
use hn_digest_core::models::ItemPayload;
use hn_digest_core::{Error, Result};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;

const USER_AGENT: &str = concat!("hn-digest/", env!("CARGO_PKG_VERSION"));

pub struct HackerNewsClient {
    client: reqwest::Client,
    base: Url,
}

impl HackerNewsClient {
    /// `base` must end in `/` (see [`Config::api_base`]).
    pub fn new(base: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.api_base()?,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base
            .join(path)
            .map_err(|e| Error::fetch(format!("{}: {}", path, e)))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::fetch(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("GET {}: HTTP {}", url, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::fetch(format!("GET {}: invalid body: {}", url, e)))
    }
}

#[async_trait]
impl ContentClient for HackerNewsClient {
    async fn fetch_top_ids(&self) -> Result<Vec<i64>> {
        let ids: Option<Vec<i64>> = self.get_json("topstories.json").await?;
        ids.ok_or_else(|| Error::fetch("topstories.json returned null"))
    }

    async fn fetch_item(&self, id: i64) -> Result<Option<ItemPayload>> {
        self.get_json(&format!("item/{}.json", id)).await
    }
}
