use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::spatial::kd_tree::KDTree;

/// How many nearest stars each star links to.
pub const NEAREST_NEIGHBOURS: usize = 3;

/// Undirected link between two stars, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionEdge {
    pub a: usize,
    pub b: usize,
}

impl ConnectionEdge {
    /// Builds the edge only when `from < to`; the reverse direction of a
    /// symmetric neighbour pair is reported by the other endpoint.
    pub fn forward(from: usize, to: usize) -> Option<Self> {
        (from < to).then_some(ConnectionEdge { a: from, b: to })
    }
}

/// Links every star to its `k` nearest neighbours.
///
/// Neighbours are taken in ascending distance and an edge (i, j) is kept
/// only when i < j, so each unordered pair appears at most once and each
/// star is the lower endpoint of at most `k` edges. A star can still pick
/// up extra edges from other stars' neighbour lists.
pub fn nearest_neighbor_edges(positions: &[Vec3], k: usize) -> Vec<ConnectionEdge> {
    if positions.len() < 2 || k == 0 {
        return Vec::new();
    }

    let points: Vec<[f32; 3]> = positions.iter().map(|p| p.to_array()).collect();
    let kd = KDTree::build(&points);

    let mut edges = Vec::new();
    for (i, point) in points.iter().enumerate() {
        let neighbours = kd
            .nearest_n(*point, k + 1)
            .into_iter()
            .filter(|&(j, _)| j != i)
            .take(k);
        edges.extend(neighbours.filter_map(|(j, _)| ConnectionEdge::forward(i, j)));
    }
    edges
}
