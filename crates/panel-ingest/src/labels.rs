//! Value-label sidecar loading.
//!
//! A sidecar lists, for each categorical variable of one extract, its codes
//! and their human-readable labels. Row order defines level order, so ordinal
//! scales keep their ordering.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::csv::normalize_header;
use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct LabelRecord {
    #[serde(alias = "Variable", alias = "VARIABLE", alias = "name")]
    variable: String,
    #[serde(alias = "Code", alias = "CODE", alias = "value", alias = "Value")]
    code: String,
    #[serde(alias = "Label", alias = "LABEL", alias = "text", alias = "Text")]
    label: String,
}

/// Ordered code → label mapping for one variable.
#[derive(Debug, Clone, Default)]
pub struct ValueLabels {
    levels: Vec<String>,
    by_code: BTreeMap<String, usize>,
    by_numeric: BTreeMap<String, usize>,
}

impl ValueLabels {
    fn insert(&mut self, code: &str, label: &str) -> std::result::Result<(), String> {
        let code = code.trim();
        let label = label.trim();
        if code.is_empty() || label.is_empty() {
            return Ok(());
        }
        let level = match self.levels.iter().position(|l| l == label) {
            Some(idx) => idx,
            None => {
                self.levels.push(label.to_string());
                self.levels.len() - 1
            }
        };
        if let Some(existing) = self.by_code.insert(code.to_string(), level) {
            if existing != level {
                return Err(format!(
                    "code '{code}' maps to both '{}' and '{label}'",
                    self.levels[existing]
                ));
            }
        }
        if let Some(key) = normalize_numeric_key(code) {
            self.by_numeric.insert(key, level);
        }
        Ok(())
    }

    /// Declared labels in level order.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Resolves a raw cell to its label. `1`, `1.0` and `01` match the same code.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let level = match self.by_code.get(trimmed) {
            Some(level) => *level,
            None => *self.by_numeric.get(&normalize_numeric_key(trimmed)?)?,
        };
        self.levels.get(level).map(String::as_str)
    }
}

/// Value labels keyed by canonical (lowercase) variable name.
pub type LabelSet = BTreeMap<String, ValueLabels>;

/// Loads a value-label sidecar. A missing sidecar yields an empty set.
pub fn load_value_labels(path: &Path) -> Result<LabelSet> {
    if !path.is_file() {
        return Ok(LabelSet::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| IngestError::LabelFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut labels = LabelSet::new();
    for record in reader.deserialize::<LabelRecord>() {
        let record = record.map_err(|e| IngestError::LabelFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let variable = normalize_header(&record.variable);
        if variable.is_empty() {
            continue;
        }
        labels
            .entry(variable.clone())
            .or_default()
            .insert(&record.code, &record.label)
            .map_err(|message| IngestError::LabelFile {
                path: path.to_path_buf(),
                message: format!("{variable}: {message}"),
            })?;
    }

    tracing::debug!(
        path = %path.display(),
        variables = labels.len(),
        "Loaded value labels"
    );
    Ok(labels)
}

fn normalize_numeric_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    let mut text = format!("{parsed}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text.is_empty() { None } else { Some(text) }
}
