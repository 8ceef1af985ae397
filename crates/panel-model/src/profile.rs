use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::TypeTag;

/// Type tag observed for one variable in each year it exists.
///
/// Keys are 1-based year indices. Years where the variable is absent have no
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableTypeProfile {
    pub variable: String,
    pub types: BTreeMap<usize, TypeTag>,
}

impl VariableTypeProfile {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            types: BTreeMap::new(),
        }
    }

    pub fn distinct_types(&self) -> BTreeSet<TypeTag> {
        self.types.values().copied().collect()
    }

    pub fn years_present(&self) -> usize {
        self.types.len()
    }
}

/// Serialized level list for one categorical variable in each year.
///
/// Only years where the variable is categorical have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLevelProfile {
    pub variable: String,
    pub levels: BTreeMap<usize, String>,
}

impl VariableLevelProfile {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            levels: BTreeMap::new(),
        }
    }

    pub fn distinct_level_sets(&self) -> BTreeSet<&str> {
        self.levels.values().map(String::as_str).collect()
    }
}

/// Per-variable drift diagnostics surfaced to the analyst.
///
/// `okay` is metadata only: it never gates renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDiagnostic {
    pub variable: String,
    pub type_consistent: bool,
    pub distinct_type_count: usize,
    pub years_missing: usize,
    pub okay: bool,
    pub level_set_count: usize,
    pub level_consistent: bool,
    /// Index 0 is year 1.
    pub types_by_year: Vec<Option<TypeTag>>,
    /// Index 0 is year 1.
    pub levels_by_year: Vec<Option<String>>,
}

impl VariableDiagnostic {
    pub fn has_type_drift(&self) -> bool {
        !self.type_consistent
    }

    pub fn has_level_drift(&self) -> bool {
        !self.level_consistent
    }

    pub fn is_partial(&self) -> bool {
        self.years_missing > 0
    }
}

/// A column scheduled for renaming in one specific year.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenameTarget {
    pub variable: String,
    pub year_index: usize,
    pub type_tag: TypeTag,
}

impl RenameTarget {
    pub fn new(variable: impl Into<String>, year_index: usize, type_tag: TypeTag) -> Self {
        Self {
            variable: variable.into(),
            year_index,
            type_tag,
        }
    }

    /// Name the column takes after renaming: `<variable>_<type>`.
    pub fn target_name(&self) -> String {
        format!("{}_{}", self.variable, self.type_tag.as_str())
    }
}
