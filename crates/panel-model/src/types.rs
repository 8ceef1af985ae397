use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a column, decided once when the column is loaded.
///
/// The vocabulary is closed. `Numeric` doubles as the reconciliation default:
/// when a variable drifts between types, numeric instances keep their name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Numeric,
    Text,
    Categorical,
    Date,
}

impl TypeTag {
    /// Lowercase tag used in diagnostics and in synthesized column names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Numeric => "numeric",
            TypeTag::Text => "text",
            TypeTag::Categorical => "categorical",
            TypeTag::Date => "date",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        for tag in [
            TypeTag::Numeric,
            TypeTag::Text,
            TypeTag::Categorical,
            TypeTag::Date,
        ] {
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }
}
