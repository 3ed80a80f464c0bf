//! Run-level error taxonomy. Per-unit fetch failures are handled where they
//! occur (logged, degraded to empty results); these variants cover the
//! conditions that a caller must see and check.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// An input file or directory that must exist does not.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A structured payload (JSON body, JSONL row, CSV row) failed to parse
    /// or did not have the expected shape.
    #[error("parse failure: {0}")]
    ParseFailure(String),

    /// Transport-level failure: timeout, connection refused, TLS, etc.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Zero rows where at least one is required: an empty job list, or an
    /// extraction directory with no tables to clean.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The configuration file is missing a required key or is malformed.
    #[error("configuration error: {0}")]
    ConfigMissing(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for HarvestError {
    fn from(e: serde_json::Error) -> Self {
        HarvestError::ParseFailure(e.to_string())
    }
}

impl From<serde_yaml::Error> for HarvestError {
    fn from(e: serde_yaml::Error) -> Self {
        HarvestError::ConfigMissing(e.to_string())
    }
}

impl From<csv::Error> for HarvestError {
    fn from(e: csv::Error) -> Self {
        HarvestError::ParseFailure(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
