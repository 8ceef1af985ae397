//! CSV reading utilities.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{ExtractRef, RawTable, read_raw_table};
