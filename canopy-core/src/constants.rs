/// Canopy system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Mean Earth radius used by the haversine formula (meters).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Smallest clique reported as a source.
pub const MIN_CLIQUE_SIZE: usize = 3;

/// Separator between device id and timestamp in an alert's natural key.
pub const ALERT_KEY_SEPARATOR: char = '#';
