//! Top-level Canopy configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{defaults, CorrelationConfig, ObservabilityConfig, RetentionConfig, StoreConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CANOPY_*`)
/// 2. Config file (`canopy.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CanopyConfig {
    pub store: StoreConfig,
    pub correlation: CorrelationConfig,
    pub retention: RetentionConfig,
    pub observability: ObservabilityConfig,
}

impl CanopyConfig {
    /// Load a config file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: CanopyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string. Does not validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `CANOPY_*` overrides resolved through `var`.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("CANOPY_ALERT_TTL_SECS").and_then(|s| s.parse().ok()) {
            self.store.alert_ttl_secs = v;
        }
        if let Some(v) = var("CANOPY_SWEEP_INTERVAL_SECS").and_then(|s| s.parse().ok()) {
            self.store.sweep_interval_secs = v;
        }
        if let Some(v) = var("CANOPY_OVERLAP_TOLERANCE").and_then(|s| s.parse().ok()) {
            self.correlation.overlap_tolerance = Some(v);
        }
        if let Some(v) = var("CANOPY_MIN_OVERLAPS").and_then(|s| s.parse().ok()) {
            self.correlation.min_overlaps = v;
        }
        if let Some(v) = var("CANOPY_MIN_SHARED").and_then(|s| s.parse().ok()) {
            self.correlation.min_shared = Some(v);
        }
        if let Some(v) = var("CANOPY_SOURCE_MAX_AGE_SECS").and_then(|s| s.parse().ok()) {
            self.retention.source_max_age_secs = v;
        }
        if let Some(v) = var("CANOPY_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_duration("store.alert_ttl_secs", self.store.alert_ttl_secs)?;
        check_duration("store.sweep_interval_secs", self.store.sweep_interval_secs)?;
        check_duration(
            "retention.source_max_age_secs",
            self.retention.source_max_age_secs,
        )?;
        check_duration(
            "retention.clean_interval_secs",
            self.retention.clean_interval_secs,
        )?;
        self.correlation.params()?;
        Ok(())
    }
}

fn check_duration(field: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be greater than 0".to_string(),
        });
    }
    if secs > defaults::MAX_DURATION_SECS {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be at most {}", defaults::MAX_DURATION_SECS),
        });
    }
    Ok(())
}
