//! Span definitions per operation: ingest, correlation, prune, retention.

/// Create an ingest span for one arriving alert.
#[macro_export]
macro_rules! ingest_span {
    ($key:expr) => {
        tracing::info_span!("canopy.ingest", key = %$key)
    };
}

/// Create a correlation pass span.
#[macro_export]
macro_rules! correlation_span {
    ($alert_count:expr) => {
        tracing::info_span!("canopy.correlation", alert_count = $alert_count)
    };
}

/// Create a store prune span.
#[macro_export]
macro_rules! prune_span {
    ($entry_count:expr) => {
        tracing::debug_span!("canopy.prune", entry_count = $entry_count)
    };
}

/// Create a ledger retention span.
#[macro_export]
macro_rules! retention_span {
    ($group_count:expr) => {
        tracing::info_span!("canopy.retention", group_count = $group_count)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const INGEST: &str = "canopy.ingest";
    pub const CORRELATION: &str = "canopy.correlation";
    pub const PRUNE: &str = "canopy.prune";
    pub const RETENTION: &str = "canopy.retention";
}
