//! Consistency configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::comparison::CR_ACCEPTABLE_THRESHOLD;

/// Consistency verdict configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConsistencyConfig {
    /// CR below which a judgment set is reported as acceptable
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    CR_ACCEPTABLE_THRESHOLD
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl ConsistencyConfig {
    /// Validate consistency configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(ValidationError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}
