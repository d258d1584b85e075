use std::sync::Arc;

use canopy_core::models::Alert;
use chrono::{DateTime, Duration, Utc};

/// An alert plus the wall-clock time the store received it.
#[derive(Debug, Clone)]
pub(crate) struct AlertEntry {
    pub alert: Arc<Alert>,
    pub received: DateTime<Utc>,
}

impl AlertEntry {
    pub fn new(alert: Arc<Alert>, received: DateTime<Utc>) -> Self {
        Self { alert, received }
    }

    /// An entry expires once its age reaches the TTL.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.received >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_at_ttl() {
        let t = Utc::now();
        let entry = AlertEntry::new(Arc::new(Alert::new("d", "t", 0.0, 0.0, 1.0)), t);
        let ttl = Duration::seconds(60);
        assert!(!entry.is_expired(t + Duration::seconds(59), ttl));
        assert!(entry.is_expired(t + Duration::seconds(60), ttl));
    }
}
