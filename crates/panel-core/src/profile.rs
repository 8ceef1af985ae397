//! Per-year type and level profiles for every variable.

use std::collections::BTreeMap;

use panel_model::{VariableLevelProfile, VariableTypeProfile, YearTable};

/// Separator between labels in a serialized level list.
pub const LEVEL_SEPARATOR: &str = " | ";

pub type TypeProfiles = BTreeMap<String, VariableTypeProfile>;
pub type LevelProfiles = BTreeMap<String, VariableLevelProfile>;

/// Records each column's type tag against its table's year index.
///
/// A variable absent from a table has no entry for that year.
pub fn profile_types(tables: &[YearTable]) -> TypeProfiles {
    let mut profiles = TypeProfiles::new();
    for table in tables {
        for column in table.columns() {
            profiles
                .entry(column.name.clone())
                .or_insert_with(|| VariableTypeProfile::new(column.name.as_str()))
                .types
                .insert(table.year_index(), column.type_tag());
        }
    }
    profiles
}

/// Serializes each categorical column's ordered level list per year.
///
/// Every variable seen in any table gets a profile; years where the variable
/// is absent or not categorical have no entry.
pub fn profile_levels(tables: &[YearTable]) -> LevelProfiles {
    let mut profiles = LevelProfiles::new();
    for table in tables {
        for column in table.columns() {
            let profile = profiles
                .entry(column.name.clone())
                .or_insert_with(|| VariableLevelProfile::new(column.name.as_str()));
            if let Some(levels) = column.data.levels() {
                profile
                    .levels
                    .insert(table.year_index(), serialize_levels(levels));
            }
        }
    }
    profiles
}

/// Joins levels in their source order.
pub fn serialize_levels(levels: &[String]) -> String {
    levels.join(LEVEL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{CategoricalData, ColumnData, TypeTag, YearColumn};

    fn table(year_index: usize, columns: Vec<YearColumn>) -> YearTable {
        YearTable::new(year_index, format!("y{year_index}"), columns).unwrap()
    }

    fn categorical(name: &str, levels: &[&str]) -> YearColumn {
        let levels = levels.iter().map(|l| (*l).to_string()).collect();
        YearColumn::new(
            name,
            ColumnData::Categorical(CategoricalData::new(levels, vec![Some(0)]).unwrap()),
        )
    }

    #[test]
    fn types_keyed_by_year_index() {
        let tables = vec![
            table(1, vec![YearColumn::new("a", ColumnData::Numeric(vec![None]))]),
            table(
                2,
                vec![YearColumn::new("a", ColumnData::Text(vec![Some("x".into())]))],
            ),
            table(3, vec![YearColumn::new("b", ColumnData::Numeric(vec![None]))]),
        ];
        let profiles = profile_types(&tables);

        let a = &profiles["a"];
        assert_eq!(a.types.get(&1), Some(&TypeTag::Numeric));
        assert_eq!(a.types.get(&2), Some(&TypeTag::Text));
        assert_eq!(a.types.get(&3), None);
        assert_eq!(profiles["b"].years_present(), 1);
    }

    #[test]
    fn levels_preserve_order() {
        let tables = vec![
            table(1, vec![categorical("satis", &["Low", "High"])]),
            table(2, vec![categorical("satis", &["High", "Low"])]),
            table(3, vec![YearColumn::new("satis", ColumnData::Numeric(vec![None]))]),
        ];
        let profiles = profile_levels(&tables);

        let satis = &profiles["satis"];
        assert_eq!(satis.levels.get(&1).map(String::as_str), Some("Low | High"));
        assert_eq!(satis.levels.get(&2).map(String::as_str), Some("High | Low"));
        assert_eq!(satis.levels.get(&3), None);
        assert_eq!(satis.distinct_level_sets().len(), 2);
    }

    #[test]
    fn non_categorical_variables_have_empty_level_profiles() {
        let tables = vec![table(
            1,
            vec![YearColumn::new("a", ColumnData::Numeric(vec![None]))],
        )];
        let profiles = profile_levels(&tables);
        assert!(profiles["a"].levels.is_empty());
    }
}
