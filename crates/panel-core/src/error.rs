#![deny(unsafe_code)]

use thiserror::Error;

use panel_ingest::IngestError;
use panel_model::{ModelError, TypeTag};

/// Failure while renaming drifting columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    /// The synthesized `<variable>_<type>` name already exists in that year.
    #[error(
        "cannot rename '{variable}' to '{target}' in year '{year_label}' (index {year_index}): \
         a column with that name already exists"
    )]
    NameCollision {
        year_index: usize,
        year_label: String,
        variable: String,
        target: String,
    },

    #[error("rename target refers to year index {year_index}, but only {years} years are loaded")]
    UnknownYear { year_index: usize, years: usize },

    #[error("column '{variable}' not found in year '{year_label}'")]
    MissingColumn {
        year_label: String,
        variable: String,
    },
}

/// Failure while concatenating year tables.
#[derive(Debug, Error, PartialEq)]
pub enum UnionError {
    /// Two years carry the same column name with different types.
    #[error(
        "column '{column}' is {existing} in an earlier year but {incoming} in year index {year_index}"
    )]
    TypeConflict {
        column: String,
        existing: TypeTag,
        incoming: TypeTag,
        year_index: usize,
    },

    /// An input already has a column named like the provenance column.
    #[error("year index {year_index} already has a column named '{column}'")]
    ReservedColumn { column: String, year_index: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Fatal failure of one file-group invocation. No partial output is returned.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("file group '{group}': {source}")]
    Ingest {
        group: String,
        #[source]
        source: IngestError,
    },

    #[error("file group '{group}': {source}")]
    Rename {
        group: String,
        #[source]
        source: RenameError,
    },

    #[error("file group '{group}': {source}")]
    Union {
        group: String,
        #[source]
        source: UnionError,
    },

    #[error("file group '{group}': no year labels requested")]
    NoYears { group: String },

    /// A table's year index does not match its position in the sequence.
    #[error(
        "file group '{group}': table for year '{year_label}' at position {position} \
         is stamped year index {year_index}"
    )]
    YearOrder {
        group: String,
        year_label: String,
        position: usize,
        year_index: usize,
    },
}

impl PipelineError {
    pub fn group(&self) -> &str {
        match self {
            PipelineError::Ingest { group, .. }
            | PipelineError::Rename { group, .. }
            | PipelineError::Union { group, .. }
            | PipelineError::NoYears { group }
            | PipelineError::YearOrder { group, .. } => group,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
