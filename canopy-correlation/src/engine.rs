//! CorrelationEngine: wires the alert store, one correlation pass per
//! arriving alert, and the source ledger.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use canopy_core::config::CanopyConfig;
use canopy_core::constants::VERSION;
use canopy_core::errors::CanopyResult;
use canopy_core::models::{Alert, CorrelationParams, Envelope, SourcesResponse};
use canopy_core::traits::IAlertLookup;
use canopy_observability::ingest_span;
use canopy_store::{spawn_sweeper, AlertStore, SweeperHandle};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::ledger::SourceLedger;
use crate::pipeline::correlate;

/// Counts from one correlation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    /// Alerts in the snapshot the pass ran on.
    pub active_alerts: usize,
    /// Groups produced by this pass.
    pub new_sources: usize,
    /// Groups held by the ledger after appending.
    pub total_sources: usize,
}

/// The correlation engine.
///
/// Owns the alert store and the source ledger. Ingestion runs a full pass on
/// every new alert; readers list the ledger concurrently.
pub struct CorrelationEngine {
    store: Arc<AlertStore>,
    params: CorrelationParams,
    ledger: Mutex<SourceLedger>,
    sweep_interval: Duration,
    source_max_age: chrono::Duration,
    clean_interval: Duration,
}

impl CorrelationEngine {
    /// Build an engine from validated configuration.
    pub fn from_config(config: &CanopyConfig) -> CanopyResult<Self> {
        config.validate()?;
        let params = config.correlation.params()?;
        let store = Arc::new(AlertStore::new(config.store.ttl()));
        info!(
            version = VERSION,
            tolerance = params.tolerance.value(),
            min_overlaps = params.min_overlaps,
            min_shared = ?params.min_shared,
            "correlation engine configured"
        );

        Ok(Self {
            store,
            params,
            ledger: Mutex::new(SourceLedger::new()),
            sweep_interval: config.store.sweep_interval(),
            source_max_age: config.retention.max_age(),
            clean_interval: config.retention.clean_interval(),
        })
    }

    /// Build an engine around an existing store, with default maintenance
    /// intervals.
    pub fn with_store(store: Arc<AlertStore>, params: CorrelationParams) -> Self {
        let defaults = CanopyConfig::default();
        Self {
            store,
            params,
            ledger: Mutex::new(SourceLedger::new()),
            sweep_interval: defaults.store.sweep_interval(),
            source_max_age: defaults.retention.max_age(),
            clean_interval: defaults.retention.clean_interval(),
        }
    }

    pub fn store(&self) -> &Arc<AlertStore> {
        &self.store
    }

    pub fn params(&self) -> &CorrelationParams {
        &self.params
    }

    /// Record a validated alert and run a correlation pass over everything
    /// currently active.
    pub fn handle_alert(&self, alert: Alert) -> PassOutcome {
        let alert = self.store.add(alert);
        let _span = ingest_span!(alert.key()).entered();
        self.run_pass()
    }

    /// Resolve a queue envelope and handle the alert it names.
    ///
    /// A record that does not exist yet is logged and skipped (`Ok(None)`);
    /// lookup failures propagate.
    pub fn handle_envelope(
        &self,
        lookup: &dyn IAlertLookup,
        envelope: &Envelope,
    ) -> CanopyResult<Option<PassOutcome>> {
        match lookup.get_alert(&envelope.device_id, &envelope.ts)? {
            Some(alert) => Ok(Some(self.handle_alert(alert))),
            None => {
                warn!(key = %envelope.key(), "alert record not found, skipping");
                Ok(None)
            }
        }
    }

    /// Snapshot the store, correlate, and append the result to the ledger.
    pub fn run_pass(&self) -> PassOutcome {
        let active = self.store.snapshot();
        let sources = correlate(&active, &self.params);
        let new_sources = sources.len();
        let total_sources = self.ledger().extend(sources);

        info!(
            active_alerts = active.len(),
            new_sources,
            total_sources,
            "correlation pass complete"
        );
        PassOutcome {
            active_alerts: active.len(),
            new_sources,
            total_sources,
        }
    }

    /// Deep-copied listing of every accumulated source.
    pub fn list_sources(&self) -> SourcesResponse {
        self.ledger().response()
    }

    /// Apply ledger retention. Returns the number of groups dropped.
    pub fn clean_old_sources(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> usize {
        self.ledger().retain_recent(now, max_age)
    }

    /// Prune expired alerts from the store.
    pub fn prune_alerts(&self, now: DateTime<Utc>) -> usize {
        self.store.prune(now)
    }

    /// Start the background store sweeper and ledger cleaner.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_maintenance(self: &Arc<Self>) -> MaintenanceHandle {
        let sweeper = spawn_sweeper(Arc::clone(&self.store), self.sweep_interval);

        let engine = Arc::clone(self);
        let cleaner = tokio::spawn(async move {
            let mut timer = interval(engine.clean_interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            timer.tick().await;

            loop {
                timer.tick().await;
                debug!("running scheduled source cleanup");
                let now = engine.store.clock().now();
                engine.clean_old_sources(now, engine.source_max_age);
            }
        });

        info!(
            clean_interval_secs = self.clean_interval.as_secs(),
            "source cleaner started"
        );
        MaintenanceHandle { sweeper, cleaner }
    }

    fn ledger(&self) -> MutexGuard<'_, SourceLedger> {
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Background maintenance tasks. Dropping the handle stops both.
#[derive(Debug)]
pub struct MaintenanceHandle {
    sweeper: SweeperHandle,
    cleaner: JoinHandle<()>,
}

impl MaintenanceHandle {
    pub fn stop(self) {
        self.cleaner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.sweeper.is_finished() && self.cleaner.is_finished()
    }
}

impl Drop for MaintenanceHandle {
    fn drop(&mut self) {
        self.cleaner.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::errors::{CanopyError, LookupError};
    use canopy_core::models::OverlapTolerance;
    use std::collections::HashMap;

    struct MapLookup(HashMap<String, Alert>);

    impl IAlertLookup for MapLookup {
        fn get_alert(&self, device_id: &str, ts: &str) -> CanopyResult<Option<Alert>> {
            Ok(self.0.get(&format!("{device_id}#{ts}")).cloned())
        }
    }

    struct DownLookup;

    impl IAlertLookup for DownLookup {
        fn get_alert(&self, _device_id: &str, _ts: &str) -> CanopyResult<Option<Alert>> {
            Err(LookupError::Unavailable {
                reason: "connection refused".to_string(),
            }
            .into())
        }
    }

    fn engine() -> CorrelationEngine {
        let params = CorrelationParams::new(OverlapTolerance::new(1.1).unwrap(), 3);
        CorrelationEngine::with_store(
            Arc::new(AlertStore::new(chrono::Duration::seconds(60))),
            params,
        )
    }

    fn alert(id: &str, lat: f64, lon: f64) -> Alert {
        Alert::new(id, "2025-10-08T17:00:00Z", lat, lon, 300.0)
    }

    #[test]
    fn each_alert_triggers_a_pass() {
        let engine = engine();
        let first = engine.handle_alert(alert("a", 50.000, 20.000));
        assert_eq!(first.active_alerts, 1);
        assert_eq!(first.new_sources, 0);

        engine.handle_alert(alert("b", 50.002, 20.000));
        let third = engine.handle_alert(alert("c", 50.001, 20.002));
        assert_eq!(third.active_alerts, 3);
        assert_eq!(third.new_sources, 1);
        assert_eq!(third.total_sources, 1);

        let listing = engine.list_sources();
        assert_eq!(listing.count, 1);
        assert_eq!(listing.sources[0].alerts.len(), 3);
    }

    #[test]
    fn envelope_is_resolved_through_lookup() {
        let engine = engine();
        let a = alert("a", 50.0, 20.0);
        let lookup = MapLookup(HashMap::from([(a.key(), a.clone())]));

        let outcome = engine
            .handle_envelope(&lookup, &Envelope::new("a", a.ts.clone()))
            .unwrap();
        assert_eq!(outcome.map(|o| o.active_alerts), Some(1));

        let missing = engine
            .handle_envelope(&lookup, &Envelope::new("zzz", "t"))
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn lookup_failure_propagates() {
        let engine = engine();
        let err = engine
            .handle_envelope(&DownLookup, &Envelope::new("a", "t"))
            .unwrap_err();
        assert!(matches!(err, CanopyError::Lookup(LookupError::Unavailable { .. })));
    }

    #[test]
    fn from_config_requires_tolerance() {
        let config = CanopyConfig::default();
        assert!(matches!(
            CorrelationEngine::from_config(&config),
            Err(CanopyError::Config(_))
        ));
    }
}
