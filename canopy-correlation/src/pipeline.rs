//! One correlation pass over an alert snapshot.

use std::sync::Arc;

use canopy_core::models::{Alert, CorrelationParams, SourceGroup};
use canopy_observability::correlation_span;
use tracing::debug;

use crate::cliques::source_groups;
use crate::consolidate::consolidate;
use crate::graph::OverlapGraph;

/// Overlap graph → maximal cliques → (optional) consolidation.
///
/// Never fails: fewer than three alerts, or no qualifying clique, yields an
/// empty vector. The result depends only on `alerts` (including its order)
/// and `params`.
pub fn correlate(alerts: &[Arc<Alert>], params: &CorrelationParams) -> Vec<SourceGroup> {
    let _span = correlation_span!(alerts.len()).entered();

    let Some(graph) = OverlapGraph::build(alerts, params.tolerance) else {
        debug!(alerts = alerts.len(), "too few alerts to correlate");
        return Vec::new();
    };
    debug!(
        vertices = graph.len(),
        edges = graph.edge_count(),
        "overlap graph built"
    );

    let groups = source_groups(alerts, &graph, params.min_overlaps);
    debug!(cliques = groups.len(), "maximal cliques enumerated");

    match params.min_shared {
        Some(min_shared) => {
            let merged = consolidate(&groups, min_shared);
            debug!(before = groups.len(), after = merged.len(), "groups consolidated");
            merged
        }
        None => groups,
    }
}
