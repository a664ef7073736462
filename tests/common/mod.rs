//! Shared helpers for hn-digest integration tests.
//!
//! Import with `mod common;` at the top of each test file.

#![allow(dead_code)]

pub mod fake_hn_api;

use std::fs;
use std::path::{Path, PathBuf};

use hn_digest::config::{self, Config};
use tempfile::TempDir;

/// Write a JSON config into `tmp` and return its path.
///
/// `extra` is spliced into the top-level object, e.g.
/// `r#""blacklisted_domains": ["example.com"]"#`.
pub fn write_config(tmp: &TempDir, api_base: &str, extra: &str) -> PathBuf {
    let db_path = tmp.path().join("data").join("hn.sqlite");
    let mut body = format!(
        r#"{{
  "api_base_url": "{}",
  "purge_after_days": 30,
  "db_dsn": "{}",
  "email_to": "digest@example.org",
  "smtp": {{ "host": "localhost", "port": 25 }}"#,
        api_base,
        db_path.display()
    );
    if !extra.is_empty() {
        body.push_str(",\n  ");
        body.push_str(extra);
    }
    body.push_str("\n}\n");

    let path = tmp.path().join("config.json");
    fs::write(&path, body).unwrap();
    path
}

pub fn load(path: &Path) -> Config {
    config::load_config(path).unwrap()
}

/// Story JSON in the shape the HN API returns.
pub fn story(id: i64, title: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "by": "pg",
        "descendants": 0,
        "id": id,
        "score": 1,
        "time": 1_700_000_000 + id,
        "title": title,
        "type": "story",
        "url": url
    })
}
