//! Year table ingestion.
//!
//! This crate turns one file per (file group, year label) into typed
//! [`panel_model::YearTable`]s.
//!
//! # Features
//!
//! - **Layout**: Resolve data and value-label files from a naming pattern
//! - **CSV Loading**: Read extracts with polars, lowercasing column names
//! - **Value Labels**: Read ordered code/label sidecars for categorical columns
//! - **Typing**: Decide each column's type tag once, at load time
//! - **Parallel Loads**: Load years on the rayon pool, reassembled in order
//!
//! # Example
//!
//! ```ignore
//! use panel_ingest::{CsvSource, SourceLayout, load_years};
//!
//! let source = CsvSource::new(SourceLayout::new("data/frs"));
//! let years = vec!["1994".to_string(), "1995".to_string()];
//! let tables = load_years(&source, "household", &years, true)?;
//! ```

mod csv;
mod error;
mod labels;
mod layout;
mod source;
mod typing;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{ExtractRef, RawTable, normalize_header, read_raw_table};

// === Layout ===
pub use layout::{DEFAULT_FILE_PATTERN, DEFAULT_LABELS_SUFFIX, DEFAULT_NA_TOKENS, SourceLayout};

// === Value Labels ===
pub use labels::{LabelSet, ValueLabels, load_value_labels};

// === Loading ===
pub use source::{CsvSource, YearTableSource, load_years};
pub use typing::type_column;
