//! SourceLedger: owned accumulator of source groups across correlation passes.

use canopy_core::models::{SourceGroup, SourceReport, SourcesResponse};
use canopy_observability::retention_span;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

/// Append-only list of source groups with an externally driven retention
/// policy.
#[derive(Debug, Default)]
pub struct SourceLedger {
    groups: Vec<SourceGroup>,
}

impl SourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the groups of one pass. Returns the new total.
    pub fn extend(&mut self, groups: impl IntoIterator<Item = SourceGroup>) -> usize {
        self.groups.extend(groups);
        self.groups.len()
    }

    pub fn groups(&self) -> &[SourceGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Deep copies of every held group, in insertion order.
    pub fn reports(&self) -> Vec<SourceReport> {
        self.groups.iter().map(SourceGroup::finalize).collect()
    }

    pub fn response(&self) -> SourcesResponse {
        SourcesResponse::from(self.reports())
    }

    /// Drop every group none of whose members was created after
    /// `now - max_age`. Returns how many groups were dropped.
    ///
    /// A member whose `created_at` is missing or not RFC 3339 counts as stale.
    pub fn retain_recent(&mut self, now: DateTime<Utc>, max_age: Duration) -> usize {
        let _span = retention_span!(self.groups.len()).entered();
        let cutoff = now - max_age;

        let before = self.groups.len();
        self.groups.retain(|g| has_member_after(g, cutoff));
        let dropped = before - self.groups.len();

        info!(before, after = self.groups.len(), "cleaned old sources");
        dropped
    }
}

fn has_member_after(group: &SourceGroup, cutoff: DateTime<Utc>) -> bool {
    group.members.iter().any(|a| {
        DateTime::parse_from_rfc3339(&a.payload.created_at)
            .map(|t| t.with_timezone(&Utc) > cutoff)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use canopy_core::models::{Alert, AlertPayload};
    use chrono::TimeZone;

    fn alert(id: &str, created_at: &str) -> Arc<Alert> {
        Arc::new(
            Alert::new(id, "t", 50.0, 20.0, 100.0).with_payload(AlertPayload {
                created_at: created_at.to_string(),
                ..AlertPayload::default()
            }),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 8, 18, 0, 0).unwrap()
    }

    #[test]
    fn extend_accumulates_across_passes() {
        let mut ledger = SourceLedger::new();
        let g = SourceGroup::from_members(vec![alert("a", ""), alert("b", ""), alert("c", "")]);
        assert_eq!(ledger.extend(vec![g.clone()]), 1);
        assert_eq!(ledger.extend(vec![g.clone(), g]), 3);
        assert_eq!(ledger.response().count, 3);
    }

    #[test]
    fn retention_keeps_groups_with_any_recent_member() {
        let mut ledger = SourceLedger::new();
        ledger.extend(vec![
            SourceGroup::from_members(vec![
                alert("a", "2025-10-08T16:00:00Z"),
                alert("b", "2025-10-08T17:30:00Z"),
            ]),
            SourceGroup::from_members(vec![
                alert("c", "2025-10-08T16:00:00Z"),
                alert("d", "2025-10-08T16:59:59Z"),
            ]),
        ]);

        let dropped = ledger.retain_recent(now(), Duration::hours(1));
        assert_eq!(dropped, 1);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.groups()[0].contains_device("b"));
    }

    #[test]
    fn unparseable_timestamps_are_stale() {
        let mut ledger = SourceLedger::new();
        ledger.extend(vec![SourceGroup::from_members(vec![
            alert("a", ""),
            alert("b", "yesterday"),
        ])]);
        assert_eq!(ledger.retain_recent(now(), Duration::hours(1)), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let mut ledger = SourceLedger::new();
        // 19:30+02:00 is 17:30Z, inside the window.
        ledger.extend(vec![SourceGroup::from_members(vec![alert(
            "a",
            "2025-10-08T19:30:00+02:00",
        )])]);
        assert_eq!(ledger.retain_recent(now(), Duration::hours(1)), 0);
    }
}
