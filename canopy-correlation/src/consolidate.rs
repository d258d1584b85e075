//! Group consolidation: collapse cliques that describe the same acoustic
//! event with slightly different sensor sets.

use std::collections::HashSet;
use std::sync::Arc;

use canopy_core::geo::GeoPoint;
use canopy_core::models::{Alert, SourceGroup};
use tracing::debug;

/// Greedy single-pass merge.
///
/// For each surviving group `g` in input order, every later surviving group
/// that shares at least `min_shared` device ids with `g` itself is absorbed
/// into `g` and consumed. Members are unioned by device id; the survivor's
/// own members are kept as they are. The merged centroid is the member-count
/// weighted mean of the contributing centroids.
///
/// Later groups are compared against `g`'s original members only, never
/// against members it absorbed during the scan: if A absorbs B and C
/// overlaps B but not A, C stays separate. Use
/// [`consolidate_to_fixed_point`] to chase those chains.
pub fn consolidate(groups: &[SourceGroup], min_shared: usize) -> Vec<SourceGroup> {
    let mut consumed = vec![false; groups.len()];
    let mut merged = Vec::with_capacity(groups.len());

    for i in 0..groups.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;

        let mut acc = Accumulator::new(&groups[i]);
        for j in (i + 1)..groups.len() {
            if consumed[j] {
                continue;
            }
            if acc.shared_with(&groups[j]) >= min_shared {
                acc.absorb(&groups[j]);
                consumed[j] = true;
            }
        }

        if acc.absorbed > 0 {
            debug!(survivor = i, absorbed = acc.absorbed, "source groups merged");
        }
        merged.push(acc.finish());
    }

    merged
}

/// Re-run [`consolidate`] on its own output until no further merge happens.
pub fn consolidate_to_fixed_point(groups: &[SourceGroup], min_shared: usize) -> Vec<SourceGroup> {
    let mut current = consolidate(groups, min_shared);
    loop {
        let next = consolidate(&current, min_shared);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

struct Accumulator {
    members: Vec<Arc<Alert>>,
    /// Device ids of the seed group; the merge criterion.
    seed_devices: HashSet<String>,
    /// Device ids of every member collected so far; the dedup key.
    devices: HashSet<String>,
    sum_lat: f64,
    sum_lon: f64,
    weight: f64,
    absorbed: usize,
}

impl Accumulator {
    fn new(seed: &SourceGroup) -> Self {
        let w = seed.len() as f64;
        let seed_devices: HashSet<String> = seed.device_ids().map(str::to_string).collect();
        Self {
            members: seed.members.clone(),
            devices: seed_devices.clone(),
            seed_devices,
            sum_lat: seed.centroid.lat * w,
            sum_lon: seed.centroid.lon * w,
            weight: w,
            absorbed: 0,
        }
    }

    fn shared_with(&self, other: &SourceGroup) -> usize {
        let theirs: HashSet<&str> = other.device_ids().collect();
        theirs
            .into_iter()
            .filter(|id| self.seed_devices.contains(*id))
            .count()
    }

    fn absorb(&mut self, group: &SourceGroup) {
        for alert in &group.members {
            if self.devices.insert(alert.device_id.clone()) {
                self.members.push(Arc::clone(alert));
            }
        }
        let w = group.len() as f64;
        self.sum_lat += group.centroid.lat * w;
        self.sum_lon += group.centroid.lon * w;
        self.weight += w;
        self.absorbed += 1;
    }

    fn finish(self) -> SourceGroup {
        SourceGroup {
            centroid: GeoPoint::new(self.sum_lat / self.weight, self.sum_lon / self.weight),
            members: self.members,
        }
    }
}
