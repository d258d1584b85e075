use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;
use crate::models::{CorrelationParams, OverlapTolerance};

/// Correlation pass configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Slack factor on summed detection radii. Required, no default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlap_tolerance: Option<f64>,
    /// Minimum overlap edges inside a reported clique.
    pub min_overlaps: usize,
    /// Shared-member threshold for consolidation; absent disables it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_shared: Option<usize>,
}

impl CorrelationConfig {
    /// Resolve into validated pass parameters.
    pub fn params(&self) -> Result<CorrelationParams, ConfigError> {
        let raw = self
            .overlap_tolerance
            .ok_or_else(|| ConfigError::MissingField {
                field: "correlation.overlap_tolerance".to_string(),
            })?;
        let tolerance = OverlapTolerance::new(raw)?;
        if self.min_shared == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "correlation.min_shared".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(CorrelationParams {
            tolerance,
            min_overlaps: self.min_overlaps,
            min_shared: self.min_shared,
        })
    }
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            overlap_tolerance: None,
            min_overlaps: defaults::DEFAULT_MIN_OVERLAPS,
            min_shared: None,
        }
    }
}
