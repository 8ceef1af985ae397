//! Output writers for one reconciled file group.
//!
//! - **Combined CSV**: the unioned table with a trailing `year_index` column
//! - **Diagnostics CSV**: one row per variable with per-year audit columns
//! - **Diagnostics JSON**: run summary, diagnostics and applied renames
//! - **DataFrame**: the combined table as a polars frame

mod error;
mod frame;
mod json;
mod writer;

use std::path::{Path, PathBuf};

use panel_core::UnionResult;

pub use error::{ReportError, Result};
pub use frame::combined_to_dataframe;
pub use json::{DiagnosticsDocument, write_diagnostics_json};
pub use writer::{render_diagnostics, write_combined_csv, write_diagnostics_csv};

/// Paths written for one file group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutputs {
    pub combined: PathBuf,
    pub diagnostics_csv: PathBuf,
    pub diagnostics_json: PathBuf,
}

impl GroupOutputs {
    /// `<group>_combined.csv`, `<group>_diagnostics.csv`, `<group>_diagnostics.json`.
    pub fn in_dir(output_dir: &Path, group: &str) -> Self {
        Self {
            combined: output_dir.join(format!("{group}_combined.csv")),
            diagnostics_csv: output_dir.join(format!("{group}_diagnostics.csv")),
            diagnostics_json: output_dir.join(format!("{group}_diagnostics.json")),
        }
    }
}

/// Writes every artifact for one file group into `output_dir`.
pub fn write_group_outputs(result: &UnionResult, output_dir: &Path) -> Result<GroupOutputs> {
    let outputs = GroupOutputs::in_dir(output_dir, &result.group);
    write_combined_csv(&result.combined, &outputs.combined)?;
    write_diagnostics_csv(
        &result.diagnostics,
        result.combined.year_labels(),
        &outputs.diagnostics_csv,
    )?;
    write_diagnostics_json(result, &outputs.diagnostics_json)?;
    Ok(outputs)
}
