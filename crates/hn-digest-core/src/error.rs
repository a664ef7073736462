//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Run-level failures. Each variant aborts the run.
///
/// Per-item fetch failures are not represented here: the pipeline absorbs
/// them and counts them in its report.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid filter pattern or malformed configuration value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The ranked id list could not be fetched or decoded.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Dedup lookup or batch commit failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    pub fn fetch(msg: impl std::fmt::Display) -> Self {
        Error::Fetch(msg.to_string())
    }

    pub fn persistence(msg: impl std::fmt::Display) -> Self {
        Error::Persistence(msg.to_string())
    }
}
