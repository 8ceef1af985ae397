use thiserror::Error;

/// Structural violations of the table model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("category code {code} out of range for column with {levels} levels")]
    CodeOutOfRange { code: u32, levels: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
