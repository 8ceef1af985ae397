//! Renames drifting columns so concatenation never merges two types.

use std::collections::BTreeSet;

use tracing::debug;

use panel_model::{RenameTarget, YearTable};

use crate::error::RenameError;

/// Renames `variable` to `<variable>_<type>` in each targeted year.
///
/// Targets are validated before any table is touched, so on error the
/// tables are left unchanged. Values are never modified.
pub fn apply_renames(
    tables: &mut [YearTable],
    targets: &BTreeSet<RenameTarget>,
) -> Result<(), RenameError> {
    for target in targets {
        let table = table_for(tables, target)?;
        if !table.contains(&target.variable) {
            return Err(RenameError::MissingColumn {
                year_label: table.year_label().to_string(),
                variable: target.variable.clone(),
            });
        }
        let new_name = target.target_name();
        if table.contains(&new_name) {
            return Err(RenameError::NameCollision {
                year_index: target.year_index,
                year_label: table.year_label().to_string(),
                variable: target.variable.clone(),
                target: new_name,
            });
        }
    }

    for target in targets {
        let years = tables.len();
        let table = target
            .year_index
            .checked_sub(1)
            .and_then(|idx| tables.get_mut(idx))
            .ok_or(RenameError::UnknownYear {
                year_index: target.year_index,
                years,
            })?;
        let new_name = target.target_name();
        table
            .rename_column(&target.variable, &new_name)
            .map_err(|_| RenameError::NameCollision {
                year_index: target.year_index,
                year_label: table.year_label().to_string(),
                variable: target.variable.clone(),
                target: new_name.clone(),
            })?;
        debug!(
            year_label = table.year_label(),
            from = %target.variable,
            to = %new_name,
            "Renamed drifting column"
        );
    }
    Ok(())
}

fn table_for<'a>(
    tables: &'a [YearTable],
    target: &RenameTarget,
) -> Result<&'a YearTable, RenameError> {
    target
        .year_index
        .checked_sub(1)
        .and_then(|idx| tables.get(idx))
        .ok_or(RenameError::UnknownYear {
            year_index: target.year_index,
            years: tables.len(),
        })
}
