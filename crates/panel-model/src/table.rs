#![deny(unsafe_code)]

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{ModelError, Result};
use crate::types::TypeTag;

/// A single cell, resolved to a human-readable value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Numeric(f64),
    Text(String),
    /// The category label (never the raw code).
    Categorical(String),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Renders the cell for CSV output. Missing cells become an empty string.
    pub fn to_output_string(&self) -> String {
        match self {
            CellValue::Numeric(v) => format_numeric(*v),
            CellValue::Text(s) | CellValue::Categorical(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

/// Formats a floating-point number without a trailing `.0`.
pub fn format_numeric(v: f64) -> String {
    format!("{v}")
}

/// Category values stored as codes into an ordered level list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalData {
    levels: Vec<String>,
    codes: Vec<Option<u32>>,
}

impl CategoricalData {
    pub fn new(levels: Vec<String>, codes: Vec<Option<u32>>) -> Result<Self> {
        if let Some(code) = codes
            .iter()
            .flatten()
            .copied()
            .find(|code| *code as usize >= levels.len())
        {
            return Err(ModelError::CodeOutOfRange {
                code,
                levels: levels.len(),
            });
        }
        Ok(Self { levels, codes })
    }

    /// Builds a column from labels, appending unseen labels as new levels.
    pub fn from_labels<I, S>(levels: Vec<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut levels = levels;
        let codes = values
            .into_iter()
            .map(|value| {
                let label = value?;
                let label = label.as_ref();
                let code = match levels.iter().position(|level| level == label) {
                    Some(idx) => idx,
                    None => {
                        levels.push(label.to_string());
                        levels.len() - 1
                    }
                };
                Some(code as u32)
            })
            .collect();
        Self { levels, codes }
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn codes(&self) -> &[Option<u32>] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn label(&self, row: usize) -> Option<&str> {
        let code = (*self.codes.get(row)?)?;
        self.levels.get(code as usize).map(String::as_str)
    }
}

/// Typed column storage. The variant is the column's type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Categorical(CategoricalData),
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnData {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            ColumnData::Numeric(_) => TypeTag::Numeric,
            ColumnData::Text(_) => TypeTag::Text,
            ColumnData::Categorical(_) => TypeTag::Categorical,
            ColumnData::Date(_) => TypeTag::Date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
            ColumnData::Categorical(data) => data.len(),
            ColumnData::Date(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered level list for categorical columns.
    pub fn levels(&self) -> Option<&[String]> {
        match self {
            ColumnData::Categorical(data) => Some(data.levels()),
            _ => None,
        }
    }

    pub fn cell(&self, row: usize) -> CellValue {
        let value = match self {
            ColumnData::Numeric(values) => values.get(row).copied().flatten().map(CellValue::Numeric),
            ColumnData::Text(values) => values
                .get(row)
                .and_then(Option::as_ref)
                .map(|s| CellValue::Text(s.clone())),
            ColumnData::Categorical(data) => data
                .label(row)
                .map(|label| CellValue::Categorical(label.to_string())),
            ColumnData::Date(values) => values.get(row).copied().flatten().map(CellValue::Date),
        };
        value.unwrap_or(CellValue::Missing)
    }

    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Categorical(data) => data.codes().iter().filter(|v| v.is_none()).count(),
            ColumnData::Date(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// True when the column has rows but no present cell.
    pub fn is_all_missing(&self) -> bool {
        !self.is_empty() && self.null_count() == self.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearColumn {
    pub name: String,
    pub data: ColumnData,
}

impl YearColumn {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.data.type_tag()
    }
}

/// One rectangular table for one survey year.
///
/// `year_index` is the 1-based position of the year in the requested
/// year-label sequence, not the calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTable {
    year_index: usize,
    year_label: String,
    columns: Vec<YearColumn>,
    height: usize,
}

impl YearTable {
    pub fn new(
        year_index: usize,
        year_label: impl Into<String>,
        columns: Vec<YearColumn>,
    ) -> Result<Self> {
        let height = columns.first().map(|c| c.data.len()).unwrap_or(0);
        let mut seen = BTreeSet::new();
        for column in &columns {
            if column.data.len() != height {
                return Err(ModelError::RaggedColumn {
                    column: column.name.clone(),
                    expected: height,
                    actual: column.data.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self {
            year_index,
            year_label: year_label.into(),
            columns,
            height,
        })
    }

    pub fn year_index(&self) -> usize {
        self.year_index
    }

    pub fn year_label(&self) -> &str {
        &self.year_label
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[YearColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&YearColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Renames a column in place. Values are untouched.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from != to && self.contains(to) {
            return Err(ModelError::DuplicateColumn {
                column: to.to_string(),
            });
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == from)
            .ok_or_else(|| ModelError::ColumnNotFound {
                column: from.to_string(),
            })?;
        column.name = to.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, values: &[Option<f64>]) -> YearColumn {
        YearColumn::new(name, ColumnData::Numeric(values.to_vec()))
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = YearTable::new(
            1,
            "2001",
            vec![numeric("a", &[Some(1.0)]), numeric("b", &[Some(1.0), None])],
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::RaggedColumn { actual: 2, .. }));
    }

    #[test]
    fn rename_refuses_existing_target() {
        let mut table = YearTable::new(
            1,
            "2001",
            vec![numeric("a", &[Some(1.0)]), numeric("b", &[Some(2.0)])],
        )
        .unwrap();
        assert_eq!(
            table.rename_column("a", "b"),
            Err(ModelError::DuplicateColumn {
                column: "b".to_string()
            })
        );
        table.rename_column("a", "c").unwrap();
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn categorical_from_labels_appends_unseen_levels() {
        let data = CategoricalData::from_labels(
            vec!["Low".to_string(), "High".to_string()],
            vec![Some("High"), None, Some("Medium"), Some("Low")],
        );
        assert_eq!(data.levels(), &["Low", "High", "Medium"]);
        assert_eq!(data.codes(), &[Some(1), None, Some(2), Some(0)]);
        assert_eq!(data.label(2), Some("Medium"));
        assert_eq!(data.label(1), None);
    }

    #[test]
    fn categorical_new_validates_codes() {
        let err = CategoricalData::new(vec!["a".to_string()], vec![Some(1)]).unwrap_err();
        assert_eq!(err, ModelError::CodeOutOfRange { code: 1, levels: 1 });
    }

    #[test]
    fn cell_output_strings() {
        assert_eq!(CellValue::Numeric(3.0).to_output_string(), "3");
        assert_eq!(CellValue::Numeric(2.5).to_output_string(), "2.5");
        assert_eq!(CellValue::Missing.to_output_string(), "");
        let date = NaiveDate::from_ymd_opt(2004, 4, 1).unwrap();
        assert_eq!(CellValue::Date(date).to_output_string(), "2004-04-01");
    }

    #[test]
    fn all_missing_needs_at_least_one_row() {
        let blank = ColumnData::Text(vec![None, None]);
        assert_eq!(blank.null_count(), 2);
        assert!(blank.is_all_missing());
        assert!(!ColumnData::Text(Vec::new()).is_all_missing());
        assert!(!ColumnData::Numeric(vec![None, Some(1.0)]).is_all_missing());
    }
}
