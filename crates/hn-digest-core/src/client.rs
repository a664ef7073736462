//! Content API contract.
//!
//! The pipeline only needs two calls: the ranked id list and one item body
//! per id. The binary crate implements them over HTTP against
//! `{base}topstories.json` and `{base}item/{id}.json`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ItemPayload;

#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Ranked ids, best first. Any failure here aborts the run.
    async fn fetch_top_ids(&self) -> Result<Vec<i64>>;

    /// One item body. `Ok(None)` means the API answered `null`.
    ///
    /// Errors are treated as per-item failures by the pipeline.
    async fn fetch_item(&self, id: i64) -> Result<Option<ItemPayload>>;
}
