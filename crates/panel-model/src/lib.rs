//! Data model for reconciling yearly extracts into one longitudinal table.

pub mod combined;
pub mod error;
pub mod profile;
pub mod table;
pub mod types;

pub use combined::{CombinedColumn, CombinedTable, YEAR_INDEX_COLUMN};
pub use error::{ModelError, Result};
pub use profile::{RenameTarget, VariableDiagnostic, VariableLevelProfile, VariableTypeProfile};
pub use table::{CategoricalData, CellValue, ColumnData, YearColumn, YearTable, format_numeric};
pub use types::TypeTag;
