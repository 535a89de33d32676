//! Judging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Judging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JudgingConfig {
    /// How many teams per domain advance to Round 2
    #[serde(default = "default_per_domain_top_n")]
    pub per_domain_top_n: usize,
}

impl JudgingConfig {
    /// Validate the judging section
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.per_domain_top_n == 0 {
            return Err(ValidationError::InvalidTopN);
        }
        Ok(())
    }
}

impl Default for JudgingConfig {
    fn default() -> Self {
        Self {
            per_domain_top_n: default_per_domain_top_n(),
        }
    }
}

fn default_per_domain_top_n() -> usize {
    3
}
