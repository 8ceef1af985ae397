//! Where a group/year extract lives on disk.

use std::path::{Path, PathBuf};

/// Default data file pattern. `{group}` and `{year}` are substituted.
pub const DEFAULT_FILE_PATTERN: &str = "{group}_{year}.csv";

/// Default suffix of the value-label sidecar, replacing the data file's `.csv`.
pub const DEFAULT_LABELS_SUFFIX: &str = ".labels.csv";

/// Cell values treated as missing in addition to empty cells.
pub const DEFAULT_NA_TOKENS: &[&str] = &["NA", "."];

/// File naming convention for one directory of yearly extracts.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    pub data_dir: PathBuf,
    pub file_pattern: String,
    pub labels_suffix: String,
    pub na_tokens: Vec<String>,
}

impl SourceLayout {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            labels_suffix: DEFAULT_LABELS_SUFFIX.to_string(),
            na_tokens: DEFAULT_NA_TOKENS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_labels_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.labels_suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_na_tokens(mut self, tokens: Vec<String>) -> Self {
        self.na_tokens = tokens;
        self
    }

    /// Path of the data file for one group and year.
    pub fn data_path(&self, group: &str, year_label: &str) -> PathBuf {
        let file_name = self
            .file_pattern
            .replace("{group}", group)
            .replace("{year}", year_label);
        self.data_dir.join(file_name)
    }

    /// Path of the value-label sidecar next to a data file.
    pub fn labels_path(&self, data_path: &Path) -> PathBuf {
        let stem = data_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        data_path.with_file_name(format!("{stem}{}", self.labels_suffix))
    }

    pub fn is_na_token(&self, value: &str) -> bool {
        self.na_tokens.iter().any(|token| token == value)
    }
}
