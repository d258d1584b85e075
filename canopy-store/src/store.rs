//! AlertStore: TTL-bounded map of `deviceId#ts` to alert, behind one `RwLock`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use canopy_core::models::Alert;
use canopy_core::traits::{IClock, SystemClock};
use canopy_observability::prune_span;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::entry::AlertEntry;

/// Thread-safe store of recently received alerts.
///
/// Entries are keyed by the alert's natural key, so re-delivering the same
/// alert overwrites it and refreshes its arrival time.
pub struct AlertStore {
    entries: RwLock<HashMap<String, AlertEntry>>,
    ttl: Duration,
    clock: Arc<dyn IClock>,
}

impl AlertStore {
    /// Create a store using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a store that stamps arrivals with `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn IClock>) -> Self {
        info!(ttl_secs = ttl.num_seconds(), "alert store initialized");
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &Arc<dyn IClock> {
        &self.clock
    }

    /// Insert or overwrite an alert, stamping it with the current time.
    pub fn add(&self, alert: impl Into<Arc<Alert>>) -> Arc<Alert> {
        let alert = alert.into();
        let key = alert.key();
        let received = self.clock.now();

        self.write()
            .insert(key.clone(), AlertEntry::new(Arc::clone(&alert), received));

        debug!(%key, device_id = %alert.device_id, ts = %alert.ts, "alert added");
        alert
    }

    /// Point-in-time copy of every held alert.
    ///
    /// Ordered by timestamp, then device id, so that an unchanged store always
    /// yields the same sequence.
    pub fn snapshot(&self) -> Vec<Arc<Alert>> {
        let mut alerts: Vec<Arc<Alert>> = self
            .read()
            .values()
            .map(|e| Arc::clone(&e.alert))
            .collect();

        alerts.sort_by(|a, b| a.ts.cmp(&b.ts).then_with(|| a.device_id.cmp(&b.device_id)));
        debug!(count = alerts.len(), "alert snapshot taken");
        alerts
    }

    /// Remove every entry whose age at `now` has reached the TTL.
    /// Returns the number of entries removed.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.write();
        let _span = prune_span!(entries.len()).entered();

        let before = entries.len();
        entries.retain(|key, entry| {
            let expired = entry.is_expired(now, self.ttl);
            if expired {
                debug!(%key, received = %entry.received, "pruning expired alert");
            }
            !expired
        });
        let pruned = before - entries.len();

        if pruned > 0 {
            info!(before, after = entries.len(), pruned, "alert store pruned");
        }
        pruned
    }

    /// Prune against the store's own clock.
    pub fn prune_expired(&self) -> usize {
        self.prune(self.clock.now())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Poisoned locks are recovered: the map only holds plain data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AlertEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AlertEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
