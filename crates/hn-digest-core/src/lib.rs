//! # hn-digest core
//!
//! Runtime-agnostic logic for hn-digest: the item model, title and domain
//! filters, the item store abstraction, the content client contract, and
//! the ingestion pipeline that ties them together.
//!
//! This crate contains no sqlx, HTTP, or filesystem I/O. The binary crate
//! supplies the SQLite store and the HTTP client.

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod store;

pub use error::{Error, Result};
