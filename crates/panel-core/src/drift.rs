//! Drift diagnostics and rename scheduling.
//!
//! Type drift is resolved only as far as needed to keep concatenation from
//! merging two differently-typed columns under one name. Everything else
//! (level drift, partial presence) is reported, never corrected.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use panel_model::{
    RenameTarget, TypeTag, VariableDiagnostic, VariableLevelProfile, VariableTypeProfile,
};

use crate::profile::{LevelProfiles, TypeProfiles};

/// Type that keeps the original column name when a variable drifts.
///
/// Instances of any other type are renamed to `<variable>_<type>` in the
/// years where they occur. A variable that is never numeric but drifts
/// between two other types therefore has every instance renamed and nothing
/// left under its original name.
pub const DEFAULT_TYPE: TypeTag = TypeTag::Numeric;

/// Diagnostics for every variable plus the renames needed before union.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    pub diagnostics: BTreeMap<String, VariableDiagnostic>,
    pub rename_targets: BTreeSet<RenameTarget>,
}

/// Combines type and level profiles into per-variable diagnostics.
///
/// `total_years` is the number of requested years; a variable's
/// `years_missing` counts the years in which it is structurally absent.
pub fn resolve(
    type_profiles: &TypeProfiles,
    level_profiles: &LevelProfiles,
    total_years: usize,
) -> DriftReport {
    let variables: BTreeSet<&String> = type_profiles.keys().chain(level_profiles.keys()).collect();
    let empty_types = VariableTypeProfile::default();
    let empty_levels = VariableLevelProfile::default();
    let mut report = DriftReport::default();

    for variable in variables {
        let type_profile = type_profiles.get(variable).unwrap_or(&empty_types);
        let types = &type_profile.types;
        let levels = level_profiles.get(variable).unwrap_or(&empty_levels);

        let distinct_types = type_profile.distinct_types();
        let distinct_type_count = distinct_types.len();
        let type_consistent = distinct_type_count <= 1;
        let years_missing = total_years.saturating_sub(type_profile.years_present());
        let level_set_count = levels.distinct_level_sets().len();

        let diagnostic = VariableDiagnostic {
            variable: variable.clone(),
            type_consistent,
            distinct_type_count,
            years_missing,
            okay: type_consistent && years_missing == 0,
            level_set_count,
            level_consistent: level_set_count <= 1,
            types_by_year: (1..=total_years).map(|y| types.get(&y).copied()).collect(),
            levels_by_year: (1..=total_years)
                .map(|y| levels.levels.get(&y).cloned())
                .collect(),
        };

        if !type_consistent {
            warn!(
                variable = %variable,
                types = %join_tags(&distinct_types),
                "Type drift across years"
            );
            for (year_index, tag) in types {
                if *tag != DEFAULT_TYPE {
                    report
                        .rename_targets
                        .insert(RenameTarget::new(variable.as_str(), *year_index, *tag));
                }
            }
        }
        if !diagnostic.level_consistent {
            info!(
                variable = %variable,
                level_sets = level_set_count,
                "Level drift across years"
            );
        }
        if years_missing > 0 {
            debug!(variable = %variable, years_missing, "Variable absent in some years");
        }

        report.diagnostics.insert(variable.clone(), diagnostic);
    }

    report
}

fn join_tags(tags: &BTreeSet<TypeTag>) -> String {
    tags.iter()
        .map(TypeTag::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
