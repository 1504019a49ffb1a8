// src/error.rs
// =============================================================================
// Error types for the library surface.
//
// Per-link network failures are NOT errors here: they are captured as a
// LinkStatus on the record. Only configuration problems and input that cannot
// be treated as text are reported through these types.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Configuration could not be loaded or failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The analysis could not start.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A markdown source could not be turned into a Document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} does not look like text (binary content)")]
    NotText { name: String },

    #[error("{path} is not a markdown file (expected .md or .markdown)")]
    NotMarkdown { path: PathBuf },
}
