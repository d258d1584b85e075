//! Background prune sweeper on a fixed tokio interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::AlertStore;

/// Handle to a running sweeper. Dropping it stops the sweep.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweeper.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Prune `store` every `period`, independently of ingestion and correlation.
///
/// Each sweep holds the store's write lock for a single `retain` pass.
/// Must be called from within a Tokio runtime.
pub fn spawn_sweeper(store: Arc<AlertStore>, period: Duration) -> SweeperHandle {
    info!(interval_secs = period.as_secs_f64(), "alert sweeper started");

    let task = tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        timer.tick().await;

        loop {
            timer.tick().await;
            debug!("running scheduled prune");
            store.prune_expired();
        }
    });

    SweeperHandle { task }
}
