//! Compiled defaults, taken from the production sensor service.

/// Alerts older than this are swept from the store.
pub const DEFAULT_ALERT_TTL_SECS: u64 = 60;
/// Background sweep period for the alert store.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 10;
/// Minimum overlap edges inside a reported clique.
pub const DEFAULT_MIN_OVERLAPS: usize = 3;
/// Source groups with no member newer than this are dropped from the ledger.
pub const DEFAULT_SOURCE_MAX_AGE_SECS: u64 = 3600;
/// How often the surrounding service runs ledger retention.
pub const DEFAULT_SOURCE_CLEAN_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Upper bound for any duration setting: the largest second count a
/// `chrono::Duration` can hold.
pub const MAX_DURATION_SECS: u64 = (i64::MAX / 1000) as u64;
