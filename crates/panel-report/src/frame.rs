//! Conversion of the combined table into a polars `DataFrame`.

use polars::prelude::*;

use panel_model::{CellValue, ColumnData, CombinedTable, YEAR_INDEX_COLUMN};

use crate::error::Result;

/// Builds a `DataFrame` with the combined columns followed by `year_index`.
///
/// Numeric columns become `Float64`; text, categorical labels and ISO dates
/// become `String`; `year_index` is `UInt32`.
pub fn combined_to_dataframe(table: &CombinedTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.width() + 1);
    for column in table.columns() {
        let name = column.name.as_str();
        let series = match &column.data {
            ColumnData::Numeric(values) => Series::new(name.into(), values.clone()),
            other => {
                let values: Vec<Option<String>> = (0..other.len())
                    .map(|row| match other.cell(row) {
                        CellValue::Missing => None,
                        value => Some(value.to_output_string()),
                    })
                    .collect();
                Series::new(name.into(), values)
            }
        };
        columns.push(series.into());
    }
    columns.push(Series::new(YEAR_INDEX_COLUMN.into(), table.year_index().to_vec()).into());
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::CombinedColumn;

    #[test]
    fn column_dtypes() {
        let table = CombinedTable::new(
            vec!["2001".to_string(), "2002".to_string()],
            vec![
                CombinedColumn {
                    name: "age".to_string(),
                    data: ColumnData::Numeric(vec![Some(34.0), None]),
                },
                CombinedColumn {
                    name: "name".to_string(),
                    data: ColumnData::Text(vec![None, Some("b".to_string())]),
                },
            ],
            vec![1, 2],
        )
        .unwrap();

        let df = combined_to_dataframe(&table).unwrap();

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("year_index").unwrap().dtype(), &DataType::UInt32);
        assert_eq!(df.column("age").unwrap().null_count(), 1);
        assert_eq!(df.column("name").unwrap().null_count(), 1);
    }
}
