use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retention policy for accumulated source groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    /// A group survives while any member was created within this window (seconds).
    pub source_max_age_secs: u64,
    /// How often retention runs (seconds).
    pub clean_interval_secs: u64,
}

impl RetentionConfig {
    pub fn max_age(&self) -> chrono::Duration {
        // Saturates; `validate` rejects anything above the bound.
        let secs = self.source_max_age_secs.min(defaults::MAX_DURATION_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    pub fn clean_interval(&self) -> Duration {
        Duration::from_secs(self.clean_interval_secs)
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            source_max_age_secs: defaults::DEFAULT_SOURCE_MAX_AGE_SECS,
            clean_interval_secs: defaults::DEFAULT_SOURCE_CLEAN_INTERVAL_SECS,
        }
    }
}
