use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Slack factor applied to the sum of two detection radii.
///
/// Must be finite and strictly greater than 1.0. No `Default`; the value is
/// deployment-specific.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OverlapTolerance(f64);

impl OverlapTolerance {
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || value <= 1.0 {
            return Err(ConfigError::ValidationFailed {
                field: "correlation.overlap_tolerance".to_string(),
                message: format!("must be a finite number greater than 1.0, got {value}"),
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether two circles `distance_m` apart overlap within the tolerance.
    pub fn overlaps(self, distance_m: f64, radius_a: f64, radius_b: f64) -> bool {
        distance_m <= (radius_a + radius_b) * self.0
    }
}

impl<'de> Deserialize<'de> for OverlapTolerance {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        OverlapTolerance::new(value).map_err(serde::de::Error::custom)
    }
}

/// Tuning knobs for one correlation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationParams {
    pub tolerance: OverlapTolerance,
    /// Minimum number of overlap edges inside a clique for it to be reported.
    pub min_overlaps: usize,
    /// Shared-member threshold for consolidation. `None` skips consolidation.
    pub min_shared: Option<usize>,
}

impl CorrelationParams {
    pub fn new(tolerance: OverlapTolerance, min_overlaps: usize) -> Self {
        Self {
            tolerance,
            min_overlaps,
            min_shared: None,
        }
    }

    pub fn with_consolidation(mut self, min_shared: usize) -> Self {
        self.min_shared = Some(min_shared);
        self
    }
}
