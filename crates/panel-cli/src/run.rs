//! Runs the reconciliation pipeline for every requested file group.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info};

use panel_core::{PipelineOptions, UnionResult, run_file_group};
use panel_ingest::{CsvSource, SourceLayout};
use panel_report::{GroupOutputs, write_group_outputs};

/// Everything one `union` invocation needs.
#[derive(Debug, Clone)]
pub struct UnionRequest {
    pub layout: SourceLayout,
    pub groups: Vec<String>,
    pub years: Vec<String>,
    pub output_dir: PathBuf,
    pub options: PipelineOptions,
    /// Reconcile and report without writing files.
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct GroupRun {
    pub result: UnionResult,
    /// `None` on a dry run.
    pub outputs: Option<GroupOutputs>,
}

#[derive(Debug)]
pub struct GroupFailure {
    pub group: String,
    pub message: String,
}

/// Outcome of a multi-group run. Groups are independent, so one failing
/// group does not stop the others.
#[derive(Debug, Default)]
pub struct UnionRun {
    pub output_dir: PathBuf,
    pub groups: Vec<GroupRun>,
    pub failures: Vec<GroupFailure>,
}

impl UnionRun {
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub fn run_union(request: &UnionRequest) -> UnionRun {
    let start = Instant::now();
    let source = CsvSource::new(request.layout.clone());
    let mut run = UnionRun {
        output_dir: request.output_dir.clone(),
        ..UnionRun::default()
    };

    for group in &request.groups {
        match run_group(&source, group, request) {
            Ok(group_run) => run.groups.push(group_run),
            Err(err) => {
                let message = format!("{err:#}");
                error!(group = %group, error = %message, "File group failed");
                run.failures.push(GroupFailure {
                    group: group.clone(),
                    message,
                });
            }
        }
    }

    info!(
        groups = run.groups.len(),
        failed = run.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "union run complete"
    );
    run
}

fn run_group(source: &CsvSource, group: &str, request: &UnionRequest) -> Result<GroupRun> {
    let result = run_file_group(source, group, &request.years, &request.options)?;
    let outputs = if request.dry_run {
        None
    } else {
        let outputs = write_group_outputs(&result, &request.output_dir)
            .with_context(|| format!("write outputs for file group '{group}'"))?;
        Some(outputs)
    };
    Ok(GroupRun { result, outputs })
}

/// Reconciles one group for inspection only; year tables are not retained.
pub fn run_profile(
    layout: SourceLayout,
    group: &str,
    years: &[String],
    parallel_load: bool,
) -> Result<UnionResult> {
    let source = CsvSource::new(layout);
    let options = PipelineOptions::default()
        .with_parallel_load(parallel_load)
        .with_retain_year_tables(false);
    let result = run_file_group(&source, group, years, &options)?;
    Ok(result)
}
