//! Error handling for the document generation engine
//!
//! Data-resolution gaps are never errors: an unresolved placeholder is left
//! in the output verbatim. The types here cover the fail-fast cases only:
//! unreadable templates, failed saves, broken data sources and bad
//! configuration.

use std::path::PathBuf;

use docgen_types::WorkId;
use thiserror::Error;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum DocgenError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    #[error("Value store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Work {0} not found")]
    WorkNotFound(WorkId),
}

/// Template load and document save failures
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed template {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures reported by a [`crate::source::DataSource`]
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },

    #[error("Failed to read data fixture {}: {source}", path.display())]
    FixtureRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed data fixture {}: {source}", path.display())]
    FixtureMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Last-entered-values store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read value store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Corrupt value store {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write value store {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Engine configuration failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid {field} {value:?}: not a chrono format string")]
    InvalidFormat { field: &'static str, value: String },
}
