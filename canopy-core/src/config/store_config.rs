use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Alert store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Time-to-live of an alert in the store (seconds).
    pub alert_ttl_secs: u64,
    /// Interval between background prune sweeps (seconds).
    pub sweep_interval_secs: u64,
}

impl StoreConfig {
    pub fn ttl(&self) -> chrono::Duration {
        // Saturates; `validate` rejects anything above the bound.
        let secs = self.alert_ttl_secs.min(defaults::MAX_DURATION_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            alert_ttl_secs: defaults::DEFAULT_ALERT_TTL_SECS,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}
