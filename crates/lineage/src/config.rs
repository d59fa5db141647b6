use serde::{Deserialize, Serialize};

use crate::error::{LineageError, Result};

/// Placeholder written for ranks without a consensus label
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Layout of the delimited lineage tables on both sides of the reducer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Field separator (tab by default)
    pub delimiter: char,

    /// Text written for unresolved ranks
    pub placeholder: String,

    /// Cell values read as "no information at this rank"
    ///
    /// Includes the default placeholder so a written table can be read back.
    pub missing_markers: Vec<String>,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            missing_markers: ["", "-", "NA", "NaN", "nan", "N/A", "null", "None"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl TableFormat {
    /// Use a different output placeholder
    ///
    /// Read markers are left alone, so an input label equal to the
    /// placeholder is still a label.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// True when a cell carries no rank information
    pub fn is_missing(&self, cell: &str) -> bool {
        self.missing_markers.iter().any(|marker| marker == cell)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(LineageError::invalid_config(
                "delimiter cannot be a line break",
            ));
        }

        if self.placeholder.trim().is_empty() {
            return Err(LineageError::invalid_config("placeholder must be non-empty"));
        }

        for value in std::iter::once(&self.placeholder).chain(&self.missing_markers) {
            if value.contains(self.delimiter) || value.contains('\n') {
                return Err(LineageError::invalid_config(format!(
                    "'{}' cannot contain the delimiter or a line break",
                    value.escape_debug()
                )));
            }
        }

        Ok(())
    }
}
