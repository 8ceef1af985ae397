use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failure while writing an output artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build data frame: {0}")]
    DataFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
