//! Error types for year table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a year table.
///
/// Every variant is fatal for the file-group invocation that raised it:
/// dropping a year silently would shrink the time series.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// The expected input file for a group/year is absent.
    #[error("source not found for group '{group}', year '{year_label}': {path}")]
    SourceNotFound {
        group: String,
        year_label: String,
        path: PathBuf,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The file could not be parsed into a rectangular table.
    #[error("cannot parse {path} (group '{group}', year '{year_label}'): {message}")]
    Format {
        group: String,
        year_label: String,
        path: PathBuf,
        message: String,
    },

    /// The value-label sidecar is malformed.
    #[error("invalid value labels in {path}: {message}")]
    LabelFile { path: PathBuf, message: String },

    /// A custom source returned a table inconsistent with the request.
    #[error("source for group '{group}', year '{year_label}' is inconsistent: {message}")]
    InvalidSource {
        group: String,
        year_label: String,
        message: String,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
