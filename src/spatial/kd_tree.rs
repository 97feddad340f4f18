/// Node in a 3D k-d tree.
#[derive(Debug, Clone)]
pub struct KDNode {
    pub point: [f32; 3],
    pub index: usize,
    pub axis: usize,
    pub left: Option<Box<KDNode>>,
    pub right: Option<Box<KDNode>>,
}

/// 3D k-d tree over star positions, answering k-nearest queries.
#[derive(Debug, Clone)]
pub struct KDTree {
    pub root: Option<Box<KDNode>>,
}

impl KDTree {
    pub fn build(points: &[[f32; 3]]) -> Self {
        let mut indices: Vec<usize> = (0..points.len()).collect();
        let root = Self::build_recursive(points, &mut indices, 0);
        KDTree { root }
    }

    fn build_recursive(
        points: &[[f32; 3]],
        idx: &mut [usize],
        depth: usize,
    ) -> Option<Box<KDNode>> {
        use core::cmp::Ordering;

        if idx.is_empty() {
            return None;
        }

        let axis = depth % 3;
        idx.sort_by(|&a, &b| {
            points[a][axis]
                .partial_cmp(&points[b][axis])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        let mid = idx.len() / 2;
        let median = idx[mid];

        Some(Box::new(KDNode {
            point: points[median],
            index: median,
            axis,
            left: Self::build_recursive(points, &mut idx[..mid], depth + 1),
            right: Self::build_recursive(points, &mut idx[mid + 1..], depth + 1),
        }))
    }

    /// Returns the `n` points closest to `target`, ascending by distance.
    ///
    /// Equal distances are ordered by point index, so the result does not
    /// depend on how the tree happened to split.
    pub fn nearest_n(&self, target: [f32; 3], n: usize) -> Vec<(usize, f32)> {
        self.nearest_n_within_radius(target, f32::INFINITY, n)
    }

    /// Returns up to `n` nearest neighbours within the given radius of the target point.
    pub fn nearest_n_within_radius(
        &self,
        target: [f32; 3],
        radius: f32,
        n: usize,
    ) -> Vec<(usize, f32)> {
        let mut best = Vec::with_capacity(n + 1);
        if n == 0 {
            return best;
        }
        let radius2 = radius * radius;
        Self::search_recursive(&self.root, target, radius2, n, &mut best);
        best.into_iter().map(|(idx, d2)| (idx, d2.sqrt())).collect()
    }

    fn search_recursive(
        node: &Option<Box<KDNode>>,
        target: [f32; 3],
        radius2: f32,
        n: usize,
        best: &mut Vec<(usize, f32)>,
    ) {
        let Some(noderef) = node else {
            return;
        };

        let dist2 = squared_distance(noderef.point, target);
        if dist2 <= radius2 {
            insert_bounded(best, n, (noderef.index, dist2));
        }

        let axis = noderef.axis;
        let delta = target[axis] - noderef.point[axis];
        let (first, second) = if delta < 0.0 {
            (&noderef.left, &noderef.right)
        } else {
            (&noderef.right, &noderef.left)
        };

        Self::search_recursive(first, target, radius2, n, best);

        let bound = if best.len() < n {
            radius2
        } else {
            best[best.len() - 1].1.min(radius2)
        };
        if delta * delta <= bound {
            Self::search_recursive(second, target, radius2, n, best);
        }
    }
}

fn squared_distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Keeps `best` sorted by (distance, index) and no longer than `n`.
fn insert_bounded(best: &mut Vec<(usize, f32)>, n: usize, candidate: (usize, f32)) {
    let pos = best.partition_point(|&(idx, d2)| {
        d2 < candidate.1 || (d2 == candidate.1 && idx < candidate.0)
    });
    if pos >= n {
        return;
    }
    best.insert(pos, candidate);
    best.truncate(n);
}
