//! Pipeline tuning.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_exchange_rate() -> f64 {
    5.6
}

const fn default_batch_size() -> usize {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Conversion rate applied to the monthly salary.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,

    /// Rows per transaction in the respondent and junction phases.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            exchange_rate: default_exchange_rate(),
            batch_size: default_batch_size(),
        }
    }
}

impl PipelineConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "pipeline.exchange_rate",
                format!("must be a positive number, got {}", self.exchange_rate),
            ));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::invalid("pipeline.batch_size", "must be at least 1"));
        }
        Ok(())
    }
}
