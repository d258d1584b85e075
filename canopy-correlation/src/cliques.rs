//! Maximal clique enumeration (Bron–Kerbosch, no pivot).
//!
//! Every recursive call owns its own R, P and X. Siblings only see each
//! other's work through the "move v from P to X" step of their parent.
//!
//! Iteration order is canonical: the initial candidate set is every vertex in
//! ascending index order, and each call walks P in the order it received it.
//! For a fixed input the reported cliques, and their order, are reproducible.

use std::sync::Arc;

use canopy_core::constants::MIN_CLIQUE_SIZE;
use canopy_core::models::{Alert, SourceGroup};
use tracing::trace;

use crate::graph::OverlapGraph;

/// All maximal cliques of at least three vertices with at least
/// `min_overlaps` internal edges, as vertex index lists in discovery order.
pub fn maximal_cliques(graph: &OverlapGraph, min_overlaps: usize) -> Vec<Vec<usize>> {
    let mut found = Vec::new();
    let all: Vec<usize> = (0..graph.len()).collect();
    bron_kerbosch(graph, min_overlaps, Vec::new(), all, Vec::new(), &mut found);
    found
}

fn bron_kerbosch(
    graph: &OverlapGraph,
    min_overlaps: usize,
    r: Vec<usize>,
    mut p: Vec<usize>,
    mut x: Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() >= MIN_CLIQUE_SIZE && graph.edges_among(&r) >= min_overlaps {
            trace!(clique = ?r, "maximal clique accepted");
            found.push(r);
        }
        return;
    }

    let candidates = p.clone();
    for v in candidates {
        let mut next_r = Vec::with_capacity(r.len() + 1);
        next_r.extend_from_slice(&r);
        next_r.push(v);
        let next_p = graph.neighbors_of(v, &p);
        let next_x = graph.neighbors_of(v, &x);

        bron_kerbosch(graph, min_overlaps, next_r, next_p, next_x, found);

        p.retain(|&u| u != v);
        x.push(v);
    }
}

/// Turn each accepted clique into a source group over `alerts`.
///
/// `alerts` must be the slice `graph` was built from.
pub fn source_groups(
    alerts: &[Arc<Alert>],
    graph: &OverlapGraph,
    min_overlaps: usize,
) -> Vec<SourceGroup> {
    maximal_cliques(graph, min_overlaps)
        .into_iter()
        .map(|clique| {
            let members = clique.iter().map(|&i| Arc::clone(&alerts[i])).collect();
            SourceGroup::from_members(members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> OverlapGraph {
        let mut m = vec![vec![false; n]; n];
        for &(a, b) in edges {
            m[a][b] = true;
        }
        OverlapGraph::from_adjacency(m).unwrap()
    }

    #[test]
    fn triangle_is_one_clique() {
        let g = graph(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(maximal_cliques(&g, 3), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn path_has_no_clique_of_three() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
        assert!(maximal_cliques(&g, 0).is_empty());
    }

    #[test]
    fn two_triangles_sharing_an_edge() {
        // 0-1-2 and 1-2-3; 0 and 3 not connected.
        let g = graph(4, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(maximal_cliques(&g, 3), vec![vec![0, 1, 2], vec![1, 2, 3]]);
    }

    #[test]
    fn k4_is_reported_once_not_as_subtriangles() {
        let g = graph(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        assert_eq!(maximal_cliques(&g, 0), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn min_overlaps_filters_small_cliques() {
        // Triangle 0-1-2 (3 edges) and K4 3-4-5-6 (6 edges).
        let g = graph(
            7,
            &[(0, 1), (1, 2), (0, 2), (3, 4), (3, 5), (3, 6), (4, 5), (4, 6), (5, 6)],
        );
        assert_eq!(maximal_cliques(&g, 3).len(), 2);
        assert_eq!(maximal_cliques(&g, 4), vec![vec![3, 4, 5, 6]]);
    }

    #[test]
    fn isolated_vertices_are_ignored() {
        let g = graph(5, &[(1, 2), (2, 4), (1, 4)]);
        assert_eq!(maximal_cliques(&g, 3), vec![vec![1, 2, 4]]);
    }

    #[test]
    fn source_groups_map_indices_to_alerts() {
        let alerts: Vec<Arc<Alert>> = (0..3)
            .map(|i| Arc::new(Alert::new(format!("d{i}"), "t", i as f64, 0.0, 1.0)))
            .collect();
        let g = graph(3, &[(0, 1), (1, 2), (0, 2)]);
        let groups = source_groups(&alerts, &g, 3);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].device_ids().collect::<Vec<_>>(), vec!["d0", "d1", "d2"]);
        assert!((groups[0].centroid.lat - 1.0).abs() < 1e-12);
        assert!(Arc::ptr_eq(&groups[0].members[0], &alerts[0]));
    }
}
