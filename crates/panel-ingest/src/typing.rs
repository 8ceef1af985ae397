//! Column type decisions, made once per column at load time.

use chrono::NaiveDate;

use panel_model::{CategoricalData, ColumnData};

use crate::labels::ValueLabels;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Types a raw string column.
///
/// Precedence: categorical when value labels are declared, then numeric when
/// every present cell parses as a number, then date when every present cell
/// parses as an ISO date, otherwise text. A column without any present cell
/// is numeric.
pub fn type_column(values: Vec<Option<String>>, labels: Option<&ValueLabels>) -> ColumnData {
    if let Some(labels) = labels {
        return categorical(&values, labels);
    }

    let present = || values.iter().flatten();

    if present().all(|v| parse_number(v).is_some()) {
        return ColumnData::Numeric(
            values
                .iter()
                .map(|v| v.as_deref().and_then(parse_number))
                .collect(),
        );
    }

    if present().all(|v| parse_date(v).is_some()) {
        return ColumnData::Date(
            values
                .iter()
                .map(|v| v.as_deref().and_then(parse_date))
                .collect(),
        );
    }

    ColumnData::Text(values)
}

/// Codes are resolved through the labels; unlabelled codes become levels
/// of their own, appended after the declared ones.
fn categorical(values: &[Option<String>], labels: &ValueLabels) -> ColumnData {
    let resolved = values.iter().map(|value| {
        value
            .as_deref()
            .map(|raw| labels.lookup(raw).unwrap_or(raw))
    });
    let data = CategoricalData::from_labels(labels.levels().to_vec(), resolved);
    let extra = data.levels().len() - labels.levels().len();
    if extra > 0 {
        tracing::debug!(
            declared = labels.levels().len(),
            extra,
            "Unlabelled codes added as levels"
        );
    }
    ColumnData::Categorical(data)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_model::TypeTag;

    fn raw(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn numeric_when_all_parse() {
        let data = type_column(raw(&[Some("1"), None, Some("2.5"), Some("-3e2")]), None);
        assert_eq!(
            data,
            ColumnData::Numeric(vec![Some(1.0), None, Some(2.5), Some(-300.0)])
        );
    }

    #[test]
    fn date_when_all_parse() {
        let data = type_column(raw(&[Some("2004-04-01"), None]), None);
        assert_eq!(data.type_tag(), TypeTag::Date);
    }

    #[test]
    fn text_on_mixed_values() {
        let data = type_column(raw(&[Some("1"), Some("2004-04-01"), Some("x")]), None);
        assert_eq!(data.type_tag(), TypeTag::Text);
    }

    #[test]
    fn all_missing_is_numeric() {
        let data = type_column(raw(&[None, None]), None);
        assert_eq!(data, ColumnData::Numeric(vec![None, None]));
        assert!(data.is_all_missing());
        assert!(!type_column(raw(&[None, Some("x")]), None).is_all_missing());
    }

    #[test]
    fn non_finite_numbers_are_text() {
        let data = type_column(raw(&[Some("inf"), Some("1")]), None);
        assert_eq!(data.type_tag(), TypeTag::Text);
    }
}
