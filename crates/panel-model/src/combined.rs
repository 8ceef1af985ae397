use crate::error::{ModelError, Result};
use crate::table::{CellValue, ColumnData};
use crate::types::TypeTag;

/// Name of the provenance column stamped on every combined row.
pub const YEAR_INDEX_COLUMN: &str = "year_index";

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedColumn {
    pub name: String,
    pub data: ColumnData,
}

impl CombinedColumn {
    pub fn type_tag(&self) -> TypeTag {
        self.data.type_tag()
    }
}

/// Row-wise union of all year tables with a 1-based `year_index` per row.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedTable {
    year_labels: Vec<String>,
    columns: Vec<CombinedColumn>,
    year_index: Vec<u32>,
}

impl CombinedTable {
    pub fn new(
        year_labels: Vec<String>,
        columns: Vec<CombinedColumn>,
        year_index: Vec<u32>,
    ) -> Result<Self> {
        for column in &columns {
            if column.data.len() != year_index.len() {
                return Err(ModelError::RaggedColumn {
                    column: column.name.clone(),
                    expected: year_index.len(),
                    actual: column.data.len(),
                });
            }
        }
        Ok(Self {
            year_labels,
            columns,
            year_index,
        })
    }

    pub fn height(&self) -> usize {
        self.year_index.len()
    }

    /// Number of data columns, excluding `year_index`.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[CombinedColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&CombinedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn year_index(&self) -> &[u32] {
        &self.year_index
    }

    pub fn year_labels(&self) -> &[String] {
        &self.year_labels
    }

    /// Maps a 1-based year index back to the label the caller supplied.
    pub fn year_label(&self, year_index: u32) -> Option<&str> {
        let idx = (year_index as usize).checked_sub(1)?;
        self.year_labels.get(idx).map(String::as_str)
    }

    pub fn cell(&self, column: &str, row: usize) -> Option<CellValue> {
        self.column(column).map(|c| c.data.cell(row))
    }

    /// Number of rows contributed by one year.
    pub fn rows_for_year(&self, year_index: u32) -> usize {
        self.year_index.iter().filter(|idx| **idx == year_index).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_label_is_one_based() {
        let table = CombinedTable::new(
            vec!["9495".to_string(), "9596".to_string()],
            vec![CombinedColumn {
                name: "x".to_string(),
                data: ColumnData::Numeric(vec![Some(1.0), None]),
            }],
            vec![1, 2],
        )
        .unwrap();
        assert_eq!(table.year_label(1), Some("9495"));
        assert_eq!(table.year_label(2), Some("9596"));
        assert_eq!(table.year_label(0), None);
        assert_eq!(table.year_label(3), None);
        assert_eq!(table.cell("x", 1), Some(CellValue::Missing));
        assert_eq!(table.rows_for_year(2), 1);
    }

    #[test]
    fn rejects_mismatched_year_index() {
        let err = CombinedTable::new(
            vec!["a".to_string()],
            vec![CombinedColumn {
                name: "x".to_string(),
                data: ColumnData::Numeric(vec![Some(1.0)]),
            }],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::RaggedColumn { .. }));
    }
}
