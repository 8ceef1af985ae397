//! Tests for panel-model types.

use panel_model::{RenameTarget, TypeTag, VariableDiagnostic};

fn diagnostic() -> VariableDiagnostic {
    VariableDiagnostic {
        variable: "region".to_string(),
        type_consistent: false,
        distinct_type_count: 2,
        years_missing: 0,
        okay: false,
        level_set_count: 1,
        level_consistent: true,
        types_by_year: vec![
            Some(TypeTag::Numeric),
            Some(TypeTag::Numeric),
            Some(TypeTag::Categorical),
        ],
        levels_by_year: vec![None, None, Some("North | South".to_string())],
    }
}

#[test]
fn diagnostic_serializes_lowercase_tags() {
    let json = serde_json::to_value(diagnostic()).expect("serialize diagnostic");
    assert_eq!(json["types_by_year"][2], "categorical");
    assert_eq!(json["levels_by_year"][0], serde_json::Value::Null);
}

#[test]
fn diagnostic_round_trips() {
    let json = serde_json::to_string(&diagnostic()).expect("serialize diagnostic");
    let round: VariableDiagnostic = serde_json::from_str(&json).expect("deserialize diagnostic");
    assert_eq!(round, diagnostic());
    assert!(round.has_type_drift());
    assert!(!round.has_level_drift());
    assert!(!round.is_partial());
}

#[test]
fn rename_targets_order_by_variable_then_year() {
    let mut targets = vec![
        RenameTarget::new("b", 1, TypeTag::Text),
        RenameTarget::new("a", 2, TypeTag::Date),
        RenameTarget::new("a", 1, TypeTag::Text),
    ];
    targets.sort();
    let names: Vec<(String, usize)> = targets
        .iter()
        .map(|t| (t.variable.clone(), t.year_index))
        .collect();
    assert_eq!(
        names,
        vec![
            ("a".to_string(), 1),
            ("a".to_string(), 2),
            ("b".to_string(), 1)
        ]
    );
}
