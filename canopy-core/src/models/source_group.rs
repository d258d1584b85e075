use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::alert::Alert;
use crate::geo::GeoPoint;

/// One estimated sound source: a centroid and the alerts that support it.
///
/// Members are shared with the alert store snapshot they were built from.
/// Call [`SourceGroup::finalize`] to obtain an owned copy for publishing.
#[derive(Debug, Clone)]
pub struct SourceGroup {
    pub centroid: GeoPoint,
    pub members: Vec<Arc<Alert>>,
}

impl SourceGroup {
    /// Build a group whose centroid is the unweighted mean of member positions.
    ///
    /// An empty member list yields a NaN centroid.
    pub fn from_members(members: Vec<Arc<Alert>>) -> Self {
        let centroid = mean_position(&members);
        Self { centroid, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn device_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|a| a.device_id.as_str())
    }

    pub fn contains_device(&self, device_id: &str) -> bool {
        self.members.iter().any(|a| a.device_id == device_id)
    }

    /// Deep-copy into a report whose lifetime is independent of the store.
    pub fn finalize(&self) -> SourceReport {
        SourceReport {
            lat: self.centroid.lat,
            lon: self.centroid.lon,
            alerts: self.members.iter().map(|a| Alert::clone(a)).collect(),
        }
    }
}

fn mean_position(members: &[Arc<Alert>]) -> GeoPoint {
    let n = members.len() as f64;
    let (sum_lat, sum_lon) = members
        .iter()
        .fold((0.0, 0.0), |(lat, lon), a| (lat + a.lat, lon + a.lon));
    GeoPoint::new(sum_lat / n, sum_lon / n)
}

/// Published form of a [`SourceGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    pub lat: f64,
    pub lon: f64,
    pub alerts: Vec<Alert>,
}

/// Listing of every source currently held by a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub count: usize,
    pub sources: Vec<SourceReport>,
}

impl From<Vec<SourceReport>> for SourcesResponse {
    fn from(sources: Vec<SourceReport>) -> Self {
        Self {
            count: sources.len(),
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, lat: f64, lon: f64) -> Arc<Alert> {
        Arc::new(Alert::new(id, "2025-10-08T17:00:00Z", lat, lon, 100.0))
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let g = SourceGroup::from_members(vec![
            alert("a", 0.0, 0.0),
            alert("b", 0.0, 2.0),
            alert("c", 2.0, 0.0),
        ]);
        assert!((g.centroid.lat - 2.0 / 3.0).abs() < 1e-12);
        assert!((g.centroid.lon - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn finalize_copies_members() {
        let shared = alert("a", 1.0, 1.0);
        let g = SourceGroup::from_members(vec![shared.clone(), alert("b", 3.0, 3.0)]);
        let report = g.finalize();
        drop(g);
        // The report owns its alerts; only our local handle still points at `shared`.
        assert_eq!(Arc::strong_count(&shared), 1);
        assert_eq!(report.alerts[0].device_id, "a");
        assert_eq!(report.lat, 2.0);
    }

    #[test]
    fn empty_group_has_nan_centroid() {
        let g = SourceGroup::from_members(vec![]);
        assert!(g.is_empty());
        assert!(g.centroid.lat.is_nan());
    }
}
