use anyhow::{Context, Result};

use panel_cli::run::{UnionRequest, UnionRun, run_profile, run_union};
use panel_core::{PipelineOptions, UnionResult};
use panel_ingest::SourceLayout;

use crate::cli::{ProfileArgs, SourceArgs, UnionArgs};

pub fn run_union_command(args: &UnionArgs) -> Result<UnionRun> {
    let data_dir = canonical_data_dir(&args.source)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| data_dir.clone());
    let request = UnionRequest {
        layout: layout_from_args(&args.source, data_dir),
        groups: args.groups.clone(),
        years: args.source.years.clone(),
        output_dir,
        options: PipelineOptions::default()
            .with_parallel_load(!args.source.sequential)
            .with_retain_year_tables(false),
        dry_run: args.dry_run,
    };
    Ok(run_union(&request))
}

pub fn run_profile_command(args: &ProfileArgs) -> Result<UnionResult> {
    let data_dir = canonical_data_dir(&args.source)?;
    let layout = layout_from_args(&args.source, data_dir);
    run_profile(
        layout,
        &args.group,
        &args.source.years,
        !args.source.sequential,
    )
}

fn canonical_data_dir(args: &SourceArgs) -> Result<std::path::PathBuf> {
    args.data_dir
        .canonicalize()
        .with_context(|| format!("data directory {}", args.data_dir.display()))
}

fn layout_from_args(args: &SourceArgs, data_dir: std::path::PathBuf) -> SourceLayout {
    let layout = SourceLayout::new(data_dir)
        .with_file_pattern(args.pattern.as_str())
        .with_labels_suffix(args.labels_suffix.as_str());
    if args.na_tokens.is_empty() {
        layout
    } else {
        layout.with_na_tokens(args.na_tokens.clone())
    }
}
