//! One file-group invocation: load, profile, resolve, rename, union.
//!
//! # Stage Order
//!
//! 1. **Load** - Read every requested year (optionally in parallel)
//! 2. **Profile** - Type and level profiles per variable
//! 3. **Resolve** - Diagnostics and rename targets
//! 4. **Rename** - `<variable>_<type>` for non-default types of drifting variables
//! 5. **Union** - Outer concatenation with `year_index`
//!
//! Each invocation is independent: the result bundle owns everything it
//! produced and nothing is shared between groups.
//!
//! # Example
//!
//! ```ignore
//! use panel_core::{PipelineOptions, run_file_group};
//! use panel_ingest::{CsvSource, SourceLayout};
//!
//! let source = CsvSource::new(SourceLayout::new("data/frs"));
//! let years = vec!["1994".to_string(), "1995".to_string()];
//! let result = run_file_group(&source, "household", &years, &PipelineOptions::default())?;
//! println!("{} rows", result.combined.height());
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use serde::Serialize;
use tracing::{info, info_span};

use panel_ingest::{YearTableSource, load_years};
use panel_model::{CombinedTable, RenameTarget, VariableDiagnostic, YearTable};

use crate::drift::resolve;
use crate::error::{PipelineError, Result};
use crate::profile::{profile_levels, profile_types};
use crate::rename::apply_renames;
use crate::union::union_tables;

/// Options for one file-group invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Load years on the rayon pool.
    pub parallel_load: bool,
    /// Keep the renamed per-year tables in the result.
    pub retain_year_tables: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel_load: true,
            retain_year_tables: true,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn with_parallel_load(mut self, enable: bool) -> Self {
        self.parallel_load = enable;
        self
    }

    #[must_use]
    pub fn with_retain_year_tables(mut self, enable: bool) -> Self {
        self.retain_year_tables = enable;
        self
    }
}

/// Output bundle of one file-group invocation.
#[derive(Debug, Clone)]
pub struct UnionResult {
    pub group: String,
    pub combined: CombinedTable,
    pub diagnostics: BTreeMap<String, VariableDiagnostic>,
    pub rename_targets: BTreeSet<RenameTarget>,
    /// Renamed per-year tables, kept for debugging when requested.
    pub year_tables: Option<Vec<YearTable>>,
}

impl UnionResult {
    pub fn summary(&self) -> GroupSummary {
        let diagnostics = self.diagnostics.values();
        GroupSummary {
            group: self.group.clone(),
            years: self.combined.year_labels().to_vec(),
            rows: self.combined.height(),
            columns: self.combined.width(),
            variables: self.diagnostics.len(),
            okay: diagnostics.clone().filter(|d| d.okay).count(),
            type_drift: diagnostics.clone().filter(|d| d.has_type_drift()).count(),
            level_drift: diagnostics.clone().filter(|d| d.has_level_drift()).count(),
            partial: diagnostics.filter(|d| d.is_partial()).count(),
            renamed: self.rename_targets.len(),
        }
    }
}

/// Counts describing one file-group run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub years: Vec<String>,
    pub rows: usize,
    pub columns: usize,
    pub variables: usize,
    pub okay: usize,
    pub type_drift: usize,
    pub level_drift: usize,
    pub partial: usize,
    pub renamed: usize,
}

/// Loads and reconciles every requested year of one file group.
///
/// Fails on the first fatal error; no partial result is returned.
pub fn run_file_group<S>(
    source: &S,
    group: &str,
    year_labels: &[String],
    options: &PipelineOptions,
) -> Result<UnionResult>
where
    S: YearTableSource + ?Sized,
{
    let span = info_span!("file_group", group);
    let _guard = span.enter();

    if year_labels.is_empty() {
        return Err(PipelineError::NoYears {
            group: group.to_string(),
        });
    }

    let tables = load_years(source, group, year_labels, options.parallel_load).map_err(|err| {
        PipelineError::Ingest {
            group: group.to_string(),
            source: err,
        }
    })?;

    reconcile(group, tables, options)
}

/// Reconciles already-loaded year tables.
///
/// Tables must be in year order, the table at position `n` (1-based)
/// stamped with year index `n`; anything else is rejected before profiling.
pub fn reconcile(
    group: &str,
    mut tables: Vec<YearTable>,
    options: &PipelineOptions,
) -> Result<UnionResult> {
    check_year_order(group, &tables)?;
    let start = Instant::now();
    let total_years = tables.len();

    let (type_profiles, level_profiles) = info_span!("profile", group).in_scope(|| {
        (profile_types(&tables), profile_levels(&tables))
    });

    let report = info_span!("resolve", group)
        .in_scope(|| resolve(&type_profiles, &level_profiles, total_years));

    info_span!("rename", group, targets = report.rename_targets.len())
        .in_scope(|| apply_renames(&mut tables, &report.rename_targets))
        .map_err(|source| PipelineError::Rename {
            group: group.to_string(),
            source,
        })?;

    let combined = info_span!("union", group)
        .in_scope(|| union_tables(&tables))
        .map_err(|source| PipelineError::Union {
            group: group.to_string(),
            source,
        })?;

    let result = UnionResult {
        group: group.to_string(),
        combined,
        diagnostics: report.diagnostics,
        rename_targets: report.rename_targets,
        year_tables: options.retain_year_tables.then_some(tables),
    };

    let summary = result.summary();
    info!(
        group,
        years = total_years,
        rows = summary.rows,
        columns = summary.columns,
        variables = summary.variables,
        type_drift = summary.type_drift,
        level_drift = summary.level_drift,
        partial = summary.partial,
        duration_ms = start.elapsed().as_millis(),
        "file group reconciled"
    );
    Ok(result)
}

fn check_year_order(group: &str, tables: &[YearTable]) -> Result<()> {
    for (idx, table) in tables.iter().enumerate() {
        if table.year_index() != idx + 1 {
            return Err(PipelineError::YearOrder {
                group: group.to_string(),
                year_label: table.year_label().to_string(),
                position: idx + 1,
                year_index: table.year_index(),
            });
        }
    }
    Ok(())
}
