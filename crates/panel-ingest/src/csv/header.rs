//! Column header normalization.

use std::collections::BTreeMap;

/// Canonical column name: BOM stripped, trimmed, lowercased.
///
/// Later stages match names case-insensitively by comparing canonical names.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_lowercase()
}

/// Normalizes all headers, reporting the first pair that collides.
pub fn normalize_headers(raw: &[String]) -> Result<Vec<String>, String> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    let mut normalized = Vec::with_capacity(raw.len());
    for original in raw {
        let name = normalize_header(original);
        if name.is_empty() {
            return Err("empty column name".to_string());
        }
        if let Some(previous) = seen.insert(name.clone(), original.as_str()) {
            return Err(format!(
                "columns '{previous}' and '{original}' collide as '{name}'"
            ));
        }
        normalized.push(name);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  HHINC  "), "hhinc");
        assert_eq!(normalize_header("\u{feff}SERNUM"), "sernum");
        assert_eq!(normalize_header("benunit"), "benunit");
    }

    #[test]
    fn test_normalize_headers_collision() {
        let raw = vec!["Age".to_string(), "AGE".to_string()];
        let err = normalize_headers(&raw).unwrap_err();
        assert!(err.contains("collide as 'age'"));
    }

    #[test]
    fn test_normalize_headers_empty() {
        let raw = vec!["a".to_string(), " ".to_string()];
        assert_eq!(normalize_headers(&raw).unwrap_err(), "empty column name");
    }
}
