//! Schema reconciliation and union of yearly extracts.
//!
//! Given per-year tables that nominally share a schema, this crate profiles
//! every variable's type and level set per year, isolates type drift by
//! renaming non-numeric instances to `<variable>_<type>`, and concatenates
//! all years into one table stamped with `year_index`.

pub mod drift;
pub mod error;
pub mod pipeline;
pub mod profile;
pub mod rename;
pub mod union;

pub use drift::{DEFAULT_TYPE, DriftReport, resolve};
pub use error::{PipelineError, RenameError, Result, UnionError};
pub use pipeline::{GroupSummary, PipelineOptions, UnionResult, reconcile, run_file_group};
pub use profile::{
    LEVEL_SEPARATOR, LevelProfiles, TypeProfiles, profile_levels, profile_types, serialize_levels,
};
pub use rename::apply_renames;
pub use union::union_tables;
