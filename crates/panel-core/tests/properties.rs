//! Property tests over randomly shaped year tables.

use proptest::prelude::*;

use panel_core::{PipelineOptions, reconcile};
use panel_model::{ColumnData, TypeTag, YearColumn, YearTable};

const NAMES: [&str; 4] = ["age", "region", "tenure", "income"];

fn column_data(tag: TypeTag, height: usize) -> ColumnData {
    match tag {
        TypeTag::Numeric => ColumnData::Numeric((0..height).map(|i| Some(i as f64)).collect()),
        TypeTag::Text => ColumnData::Text((0..height).map(|i| Some(format!("t{i}"))).collect()),
        TypeTag::Categorical => ColumnData::Categorical(
            panel_model::CategoricalData::from_labels(
                Vec::new(),
                (0..height).map(|i| Some(format!("L{}", i % 3))).collect::<Vec<_>>(),
            ),
        ),
        TypeTag::Date => ColumnData::Date(vec![None; height]),
    }
}

fn type_tag() -> impl Strategy<Value = TypeTag> {
    prop_oneof![
        Just(TypeTag::Numeric),
        Just(TypeTag::Text),
        Just(TypeTag::Categorical),
        Just(TypeTag::Date),
    ]
}

/// One year: a height plus an optional type for each candidate variable.
fn year_shape() -> impl Strategy<Value = (usize, Vec<Option<TypeTag>>)> {
    (
        0usize..6,
        proptest::collection::vec(proptest::option::of(type_tag()), NAMES.len()),
    )
}

fn build_tables(shapes: &[(usize, Vec<Option<TypeTag>>)]) -> Vec<YearTable> {
    shapes
        .iter()
        .enumerate()
        .map(|(idx, (height, tags))| {
            let columns = NAMES
                .iter()
                .zip(tags)
                .filter_map(|(name, tag)| {
                    tag.map(|tag| YearColumn::new(*name, column_data(tag, *height)))
                })
                .collect();
            YearTable::new(idx + 1, format!("{}", 2000 + idx), columns).unwrap()
        })
        .collect()
}

proptest! {
    #[test]
    fn combined_rows_equal_sum_of_year_heights(
        shapes in proptest::collection::vec(year_shape(), 1..5)
    ) {
        let tables = build_tables(&shapes);
        let heights: Vec<usize> = tables.iter().map(YearTable::height).collect();

        let result = reconcile("group", tables, &PipelineOptions::default()).unwrap();

        prop_assert_eq!(result.combined.height(), heights.iter().sum::<usize>());
        for (idx, height) in heights.iter().enumerate() {
            prop_assert_eq!(result.combined.rows_for_year(idx as u32 + 1), *height);
        }
    }

    #[test]
    fn okay_means_consistent_and_always_present(
        shapes in proptest::collection::vec(year_shape(), 1..5)
    ) {
        let tables = build_tables(&shapes);
        let result = reconcile("group", tables, &PipelineOptions::default()).unwrap();

        for diag in result.diagnostics.values() {
            prop_assert_eq!(diag.okay, diag.type_consistent && diag.years_missing == 0);
            prop_assert_eq!(diag.type_consistent, diag.distinct_type_count <= 1);
            prop_assert_eq!(diag.types_by_year.len(), shapes.len());
        }
    }

    #[test]
    fn no_combined_column_mixes_types(
        shapes in proptest::collection::vec(year_shape(), 1..5)
    ) {
        let tables = build_tables(&shapes);
        let result = reconcile("group", tables, &PipelineOptions::default()).unwrap();
        let renamed = result.year_tables.unwrap();

        for column in result.combined.columns() {
            for table in &renamed {
                if let Some(source) = table.column(&column.name) {
                    prop_assert_eq!(source.type_tag(), column.type_tag());
                }
            }
        }
    }
}
