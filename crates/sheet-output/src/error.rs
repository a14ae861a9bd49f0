//! Error types for export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing export files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write CSV records.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize the report.
    #[error("failed to write report {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
