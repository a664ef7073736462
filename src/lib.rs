//! # hn-digest
//!
//! Collects new Hacker News stories into SQLite for later digesting.
//!
//! Each run fetches the ranked story ids, skips ids already stored, fetches
//! the rest, drops stories without a url, from blacklisted domains, or
//! whose titles match none of the configured patterns, and commits the
//! survivors in one transaction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐
//! │  HN API      │──▶│  Pipeline         │──▶│  SQLite       │
//! │ (reqwest)    │   │ dedup + filters  │   │ news_items   │
//! └──────────────┘   └──────────────────┘   └──────────────┘
//! ```
//!
//! The pipeline, filters, and store trait live in `hn-digest-core`; this
//! crate supplies configuration, the HTTP client, the SQLite store, and
//! the CLI commands.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | JSON/TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |
//! | [`sqlite_store`] | SQLite `ItemStore` |
//! | [`hn_client`] | HTTP `ContentClient` |
//! | [`ingest`] | `run` command |
//! | [`purge`] | `purge` command |
//! | [`stats`] | `stats` command |

pub mod config;
pub mod db;
pub mod hn_client;
pub mod ingest;
pub mod migrate;
pub mod purge;
pub mod sqlite_store;
pub mod stats;
