//! Source file configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_path() -> String {
    "base_de_respostas_10k_amostra.csv".to_owned()
}

fn default_delimiter() -> String {
    ",".to_owned()
}

/// Cell values read as missing by default: the usual spreadsheet and
/// dataframe spellings of "no value".
pub const DEFAULT_NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.into_iter().map(str::to_owned).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Path of the survey CSV file.
    #[serde(default = "default_path")]
    pub path: String,

    /// Field delimiter (single character).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Literal cell values read as missing.
    #[serde(default = "default_null_markers")]
    pub null_markers: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            delimiter: default_delimiter(),
            null_markers: default_null_markers(),
        }
    }
}

impl SourceConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_empty() {
            return Err(ConfigError::invalid("source.path", "must not be empty"));
        }
        if self.delimiter.chars().count() != 1 {
            return Err(ConfigError::invalid(
                "source.delimiter",
                format!("expected one character, got {:?}", self.delimiter),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_survey_export() {
        let config = SourceConfig::default();
        assert_eq!(config.path, "base_de_respostas_10k_amostra.csv");
        assert_eq!(config.delimiter, ",");
        assert_eq!(config.null_markers, DEFAULT_NULL_MARKERS);
        for marker in ["", "NA", "N/A", "NULL", "NaN", "None"] {
            assert!(config.null_markers.iter().any(|m| m == marker), "{marker}");
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn multi_char_delimiter_is_invalid() {
        let config = SourceConfig {
            delimiter: ";;".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
