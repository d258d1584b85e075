//! Overlap graph: alerts are vertices, an edge joins two alerts whose
//! detection circles intersect within the tolerance.

use std::sync::Arc;

use canopy_core::constants::MIN_CLIQUE_SIZE;
use canopy_core::models::{Alert, OverlapTolerance};

/// Symmetric adjacency matrix over the alerts of one snapshot.
///
/// Vertex `i` is the alert at index `i` of the slice the graph was built
/// from. Never has self loops.
#[derive(Debug, Clone)]
pub struct OverlapGraph {
    adjacency: Vec<Vec<bool>>,
    edge_count: usize,
}

impl OverlapGraph {
    /// Build the graph for `alerts`. Returns `None` below three alerts, where
    /// no reportable clique can exist.
    pub fn build(alerts: &[Arc<Alert>], tolerance: OverlapTolerance) -> Option<Self> {
        let n = alerts.len();
        if n < MIN_CLIQUE_SIZE {
            return None;
        }

        let mut adjacency = vec![vec![false; n]; n];
        let mut edge_count = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                let d = alerts[i].distance_to(&alerts[j]);
                if tolerance.overlaps(d, alerts[i].distance, alerts[j].distance) {
                    adjacency[i][j] = true;
                    adjacency[j][i] = true;
                    edge_count += 1;
                }
            }
        }

        Some(Self {
            adjacency,
            edge_count,
        })
    }

    /// Build from a raw matrix. The matrix is symmetrized (an edge in either
    /// direction counts) and the diagonal cleared.
    ///
    /// Returns `None` if the matrix is not square.
    pub fn from_adjacency(mut adjacency: Vec<Vec<bool>>) -> Option<Self> {
        let n = adjacency.len();
        if adjacency.iter().any(|row| row.len() != n) {
            return None;
        }

        let mut edge_count = 0;
        for i in 0..n {
            adjacency[i][i] = false;
            for j in (i + 1)..n {
                let edge = adjacency[i][j] || adjacency[j][i];
                adjacency[i][j] = edge;
                adjacency[j][i] = edge;
                if edge {
                    edge_count += 1;
                }
            }
        }

        Some(Self {
            adjacency,
            edge_count,
        })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency[i][j]
    }

    /// Total number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The members of `candidates` adjacent to `v`, in their given order.
    pub fn neighbors_of(&self, v: usize, candidates: &[usize]) -> Vec<usize> {
        candidates
            .iter()
            .copied()
            .filter(|&u| self.adjacency[v][u])
            .collect()
    }

    /// Number of edges with both endpoints in `vertices`.
    pub fn edges_among(&self, vertices: &[usize]) -> usize {
        let mut count = 0;
        for (k, &i) in vertices.iter().enumerate() {
            for &j in &vertices[k + 1..] {
                if self.adjacency[i][j] {
                    count += 1;
                }
            }
        }
        count
    }
}
