//! Core data models used throughout hn-digest.
//!
//! [`ItemPayload`] mirrors the loosely-typed JSON the content API returns;
//! [`Item`] is the validated form that filters and stores operate on.

use serde::Deserialize;

/// Raw item body as returned by `GET item/{id}.json`.
///
/// Every field except `id` may be missing upstream (deleted stories, jobs,
/// comments), so they are all optional here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ItemPayload {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
}

/// A story with a non-empty url, ready for filtering and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub url: String,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: i64,
}

impl Item {
    /// Validate a payload. Returns `None` when the url is missing or blank.
    pub fn from_payload(payload: ItemPayload) -> Option<Self> {
        let url = payload.url?;
        if url.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: payload.id,
            title: payload.title.unwrap_or_default(),
            url,
            created_at: payload.time.unwrap_or(0),
        })
    }
}
