//! Writes every artifact of one reconciled group to disk and reads it back.

use std::fs;

use tempfile::TempDir;

use panel_core::{PipelineOptions, UnionResult, reconcile};
use panel_model::{CategoricalData, ColumnData, YearColumn, YearTable};
use panel_report::{GroupOutputs, combined_to_dataframe, write_group_outputs};

fn categorical(name: &str, levels: &[&str], codes: &[u32]) -> YearColumn {
    let levels = levels.iter().map(|l| (*l).to_string()).collect();
    let codes = codes.iter().copied().map(Some).collect();
    YearColumn::new(
        name,
        ColumnData::Categorical(CategoricalData::new(levels, codes).unwrap()),
    )
}

fn numeric(name: &str, values: &[f64]) -> YearColumn {
    YearColumn::new(
        name,
        ColumnData::Numeric(values.iter().copied().map(Some).collect()),
    )
}

fn household() -> UnionResult {
    let tables = vec![
        YearTable::new(
            1,
            "2001",
            vec![
                numeric("sernum", &[1.0, 2.0]),
                numeric("region", &[1.0, 2.0]),
                categorical("tenure", &["Owned", "Rented"], &[0, 1]),
            ],
        )
        .unwrap(),
        YearTable::new(
            2,
            "2002",
            vec![
                numeric("sernum", &[3.0]),
                categorical("region", &["North", "South"], &[0]),
                categorical("tenure", &["Rented", "Owned"], &[0]),
            ],
        )
        .unwrap(),
    ];
    reconcile("household", tables, &PipelineOptions::default()).unwrap()
}

#[test]
fn writes_group_artifacts() {
    let dir = TempDir::new().unwrap();
    let result = household();

    let outputs = write_group_outputs(&result, dir.path()).unwrap();

    assert_eq!(outputs, GroupOutputs::in_dir(dir.path(), "household"));
    assert!(outputs.combined.ends_with("household_combined.csv"));

    let combined = fs::read_to_string(&outputs.combined).unwrap();
    assert_eq!(
        combined,
        "sernum,region,tenure,region_categorical,year_index\n\
         1,1,Owned,,1\n\
         2,2,Rented,,1\n\
         3,,Rented,North,2\n"
    );
}

#[test]
fn diagnostics_csv_snapshot() {
    let dir = TempDir::new().unwrap();
    let outputs = write_group_outputs(&household(), dir.path()).unwrap();

    let diagnostics = fs::read_to_string(&outputs.diagnostics_csv).unwrap();

    insta::assert_snapshot!(diagnostics.trim_end(), @r"
    variable,okay,type_consistent,distinct_type_count,years_missing,level_consistent,level_set_count,type_2001,type_2002,levels_2001,levels_2002
    region,false,false,2,0,true,1,numeric,categorical,,North | South
    sernum,true,true,1,0,true,0,numeric,numeric,,
    tenure,true,true,1,0,false,2,categorical,categorical,Owned | Rented,Rented | Owned
    ");
}

#[test]
fn diagnostics_json_document() {
    let dir = TempDir::new().unwrap();
    let outputs = write_group_outputs(&household(), dir.path()).unwrap();

    let text = fs::read_to_string(&outputs.diagnostics_json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["summary"]["group"], "household");
    assert_eq!(json["summary"]["rows"], 3);
    assert_eq!(json["summary"]["type_drift"], 1);
    assert_eq!(json["summary"]["level_drift"], 1);
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 3);
    assert_eq!(json["diagnostics"][0]["variable"], "region");
    assert_eq!(json["diagnostics"][0]["types_by_year"][1], "categorical");
    assert_eq!(json["rename_targets"][0]["variable"], "region");
    assert_eq!(json["rename_targets"][0]["year_index"], 2);
}

#[test]
fn combined_frame_matches_table() {
    let result = household();

    let df = combined_to_dataframe(&result.combined).unwrap();

    assert_eq!(df.height(), 3);
    assert_eq!(
        df.get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>(),
        vec!["sernum", "region", "tenure", "region_categorical", "year_index"]
    );
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("out").join("frs");

    let outputs = write_group_outputs(&household(), &nested).unwrap();

    assert!(outputs.combined.is_file());
    assert!(outputs.diagnostics_json.is_file());
}
