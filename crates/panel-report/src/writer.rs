//! CSV writers for the combined table and the diagnostics table.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use panel_model::{CombinedTable, VariableDiagnostic, YEAR_INDEX_COLUMN};

use crate::error::{ReportError, Result};

/// Writes the combined table: data columns in combined order, then `year_index`.
///
/// Missing cells are empty, categorical cells are written as labels.
pub fn write_combined_csv(table: &CombinedTable, path: &Path) -> Result<()> {
    let file = create(path)?;
    write_combined(table, file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width() + 1,
        "Wrote combined table"
    );
    Ok(())
}

fn write_combined<W: Write>(table: &CombinedTable, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header: Vec<&str> = table.column_names().collect();
    header.push(YEAR_INDEX_COLUMN);
    writer.write_record(&header)?;

    let mut record: Vec<String> = Vec::with_capacity(header.len());
    for (row, year_index) in table.year_index().iter().enumerate() {
        record.clear();
        record.extend(
            table
                .columns()
                .iter()
                .map(|column| column.data.cell(row).to_output_string()),
        );
        record.push(year_index.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one row per variable with the drift flags plus per-year
/// `type_<label>` and `levels_<label>` audit columns.
pub fn write_diagnostics_csv(
    diagnostics: &BTreeMap<String, VariableDiagnostic>,
    year_labels: &[String],
    path: &Path,
) -> Result<()> {
    let file = create(path)?;
    render_diagnostics(diagnostics, year_labels, file).map_err(|source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        variables = diagnostics.len(),
        "Wrote diagnostics table"
    );
    Ok(())
}

/// Renders the diagnostics table into any writer.
pub fn render_diagnostics<W: Write>(
    diagnostics: &BTreeMap<String, VariableDiagnostic>,
    year_labels: &[String],
    out: W,
) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header: Vec<String> = [
        "variable",
        "okay",
        "type_consistent",
        "distinct_type_count",
        "years_missing",
        "level_consistent",
        "level_set_count",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();
    header.extend(year_labels.iter().map(|label| format!("type_{label}")));
    header.extend(year_labels.iter().map(|label| format!("levels_{label}")));
    writer.write_record(&header)?;

    for diag in diagnostics.values() {
        let mut record = vec![
            diag.variable.clone(),
            diag.okay.to_string(),
            diag.type_consistent.to_string(),
            diag.distinct_type_count.to_string(),
            diag.years_missing.to_string(),
            diag.level_consistent.to_string(),
            diag.level_set_count.to_string(),
        ];
        record.extend((0..year_labels.len()).map(|idx| {
            diag.types_by_year
                .get(idx)
                .copied()
                .flatten()
                .map(|tag| tag.as_str().to_string())
                .unwrap_or_default()
        }));
        record.extend((0..year_labels.len()).map(|idx| {
            diag.levels_by_year
                .get(idx)
                .cloned()
                .flatten()
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn create(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::{CategoricalData, ColumnData, CombinedColumn, TypeTag};

    fn combined() -> CombinedTable {
        CombinedTable::new(
            vec!["2001".to_string(), "2002".to_string()],
            vec![
                CombinedColumn {
                    name: "income".to_string(),
                    data: ColumnData::Numeric(vec![Some(100.0), Some(12.5), None]),
                },
                CombinedColumn {
                    name: "tenure".to_string(),
                    data: ColumnData::Categorical(
                        CategoricalData::new(
                            vec!["Owned".to_string(), "Rented, private".to_string()],
                            vec![Some(1), None, Some(0)],
                        )
                        .unwrap(),
                    ),
                },
            ],
            vec![1, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn combined_csv_layout() {
        let mut out = Vec::new();
        write_combined(&combined(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "income,tenure,year_index\n100,\"Rented, private\",1\n12.5,,1\n,Owned,2\n"
        );
    }

    #[test]
    fn diagnostics_columns_follow_year_labels() {
        let diag = VariableDiagnostic {
            variable: "region".to_string(),
            type_consistent: false,
            distinct_type_count: 2,
            years_missing: 0,
            okay: false,
            level_set_count: 1,
            level_consistent: true,
            types_by_year: vec![Some(TypeTag::Numeric), Some(TypeTag::Categorical)],
            levels_by_year: vec![None, Some("North | South".to_string())],
        };
        let diagnostics = [("region".to_string(), diag)].into();
        let labels = vec!["9495".to_string(), "9596".to_string()];

        let mut out = Vec::new();
        render_diagnostics(&diagnostics, &labels, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "variable,okay,type_consistent,distinct_type_count,years_missing,\
             level_consistent,level_set_count,type_9495,type_9596,levels_9495,levels_9596"
        );
        assert_eq!(
            lines.next().unwrap(),
            "region,false,false,2,0,true,1,numeric,categorical,,North | South"
        );
        assert!(lines.next().is_none());
    }
}
