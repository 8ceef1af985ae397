//! Outer row-concatenation of year tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use panel_model::{
    CategoricalData, ColumnData, CombinedColumn, CombinedTable, TypeTag, YEAR_INDEX_COLUMN,
    YearColumn, YearTable,
};

use crate::error::UnionError;

/// Accumulates one combined column across years.
enum ColumnBuilder {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Categorical {
        levels: Vec<String>,
        positions: BTreeMap<String, u32>,
        codes: Vec<Option<u32>>,
    },
    Date(Vec<Option<NaiveDate>>),
}

impl ColumnBuilder {
    fn new(tag: TypeTag, capacity: usize) -> Self {
        match tag {
            TypeTag::Numeric => ColumnBuilder::Numeric(Vec::with_capacity(capacity)),
            TypeTag::Text => ColumnBuilder::Text(Vec::with_capacity(capacity)),
            TypeTag::Categorical => ColumnBuilder::Categorical {
                levels: Vec::new(),
                positions: BTreeMap::new(),
                codes: Vec::with_capacity(capacity),
            },
            TypeTag::Date => ColumnBuilder::Date(Vec::with_capacity(capacity)),
        }
    }

    fn push_missing(&mut self, rows: usize) {
        match self {
            ColumnBuilder::Numeric(values) => values.extend(std::iter::repeat_n(None, rows)),
            ColumnBuilder::Text(values) => values.extend(std::iter::repeat_n(None, rows)),
            ColumnBuilder::Categorical { codes, .. } => {
                codes.extend(std::iter::repeat_n(None, rows));
            }
            ColumnBuilder::Date(values) => values.extend(std::iter::repeat_n(None, rows)),
        }
    }

    /// Appends a column of the same type. Categorical codes are remapped
    /// onto the ordered union of levels seen so far.
    fn push(&mut self, data: &ColumnData) {
        match (self, data) {
            (ColumnBuilder::Numeric(values), ColumnData::Numeric(src)) => {
                values.extend_from_slice(src);
            }
            (ColumnBuilder::Text(values), ColumnData::Text(src)) => {
                values.extend_from_slice(src);
            }
            (ColumnBuilder::Date(values), ColumnData::Date(src)) => {
                values.extend_from_slice(src);
            }
            (
                ColumnBuilder::Categorical {
                    levels,
                    positions,
                    codes,
                },
                ColumnData::Categorical(src),
            ) => {
                let remap: Vec<u32> = src
                    .levels()
                    .iter()
                    .map(|label| {
                        *positions.entry(label.clone()).or_insert_with(|| {
                            levels.push(label.clone());
                            (levels.len() - 1) as u32
                        })
                    })
                    .collect();
                codes.extend(
                    src.codes()
                        .iter()
                        .map(|code| code.map(|c| remap[c as usize])),
                );
            }
            // Types are checked before any data is pushed.
            _ => unreachable!("column type mismatch after type check"),
        }
    }

    fn finish(self) -> Result<ColumnData, UnionError> {
        Ok(match self {
            ColumnBuilder::Numeric(values) => ColumnData::Numeric(values),
            ColumnBuilder::Text(values) => ColumnData::Text(values),
            ColumnBuilder::Categorical { levels, codes, .. } => {
                ColumnData::Categorical(CategoricalData::new(levels, codes)?)
            }
            ColumnBuilder::Date(values) => ColumnData::Date(values),
        })
    }
}

/// Concatenates year tables row-wise into one combined table.
///
/// The column set is the union of all input column sets, in first-seen
/// order; a table lacking a column contributes missing cells. Each row is
/// stamped with its table's 1-based year index. Row order is table order,
/// then within-table order.
pub fn union_tables(tables: &[YearTable]) -> Result<CombinedTable, UnionError> {
    let mut schema: Vec<(String, TypeTag)> = Vec::new();
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();

    for table in tables {
        if table.contains(YEAR_INDEX_COLUMN) {
            return Err(UnionError::ReservedColumn {
                column: YEAR_INDEX_COLUMN.to_string(),
                year_index: table.year_index(),
            });
        }
        for column in table.columns() {
            let tag = column.type_tag();
            match positions.get(&column.name) {
                Some(&idx) => {
                    let existing = schema[idx].1;
                    if existing != tag {
                        return Err(UnionError::TypeConflict {
                            column: column.name.clone(),
                            existing,
                            incoming: tag,
                            year_index: table.year_index(),
                        });
                    }
                }
                None => {
                    positions.insert(column.name.clone(), schema.len());
                    schema.push((column.name.clone(), tag));
                }
            }
        }
    }

    let total_rows: usize = tables.iter().map(YearTable::height).sum();
    let mut builders: Vec<ColumnBuilder> = schema
        .iter()
        .map(|(_, tag)| ColumnBuilder::new(*tag, total_rows))
        .collect();
    let mut year_index: Vec<u32> = Vec::with_capacity(total_rows);

    for table in tables {
        let by_name: BTreeMap<&str, &YearColumn> = table
            .columns()
            .iter()
            .map(|c| (c.name.as_str(), c))
            .collect();
        for ((name, _), builder) in schema.iter().zip(builders.iter_mut()) {
            match by_name.get(name.as_str()) {
                Some(column) => builder.push(&column.data),
                None => builder.push_missing(table.height()),
            }
        }
        year_index.extend(std::iter::repeat_n(
            table.year_index() as u32,
            table.height(),
        ));
    }

    let mut columns = Vec::with_capacity(schema.len());
    for ((name, _), builder) in schema.into_iter().zip(builders) {
        columns.push(CombinedColumn {
            name,
            data: builder.finish()?,
        });
    }

    let year_labels = tables.iter().map(|t| t.year_label().to_string()).collect();
    Ok(CombinedTable::new(year_labels, columns, year_index)?)
}
