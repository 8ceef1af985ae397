//! JSON diagnostics document.

use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use panel_core::{GroupSummary, UnionResult};
use panel_model::{RenameTarget, VariableDiagnostic};

use crate::error::{ReportError, Result};
use crate::writer::create;

/// Serialized form of one file-group's diagnostics.
#[derive(Debug, Serialize)]
pub struct DiagnosticsDocument<'a> {
    pub summary: GroupSummary,
    pub diagnostics: Vec<&'a VariableDiagnostic>,
    pub rename_targets: Vec<&'a RenameTarget>,
}

impl<'a> DiagnosticsDocument<'a> {
    pub fn from_result(result: &'a UnionResult) -> Self {
        Self {
            summary: result.summary(),
            diagnostics: result.diagnostics.values().collect(),
            rename_targets: result.rename_targets.iter().collect(),
        }
    }
}

/// Writes the summary, every diagnostic, and the applied renames as pretty JSON.
pub fn write_diagnostics_json(result: &UnionResult, path: &Path) -> Result<()> {
    let file = create(path)?;
    let document = DiagnosticsDocument::from_result(result);
    serde_json::to_writer_pretty(BufWriter::new(file), &document).map_err(|source| {
        ReportError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), group = %result.group, "Wrote diagnostics JSON");
    Ok(())
}
