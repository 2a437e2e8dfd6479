//! Naive single-link oracles for property verification.
//!
//! Both oracles work on a dense distance matrix and share nothing with the
//! engine beyond the [`Euclidean`] measure itself, evaluated on canonical
//! `(smaller, larger)` pairs exactly as the engine's seed does.

use crate::{Dissimilarity, Euclidean};

/// Dense symmetric distance matrix over a point cloud.
pub(super) struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Evaluates every pair of `points` with [`Euclidean`].
    ///
    /// Panics when a pair cannot be evaluated; fixtures only contain finite,
    /// equally sized vectors.
    pub(super) fn euclidean(points: &[Vec<f64>]) -> Self {
        let size = points.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let distance = Euclidean
                    .dissimilarity(points[i].as_slice(), points[j].as_slice())
                    .expect("fixture points are valid");
                values[i * size + j] = distance;
                values[j * size + i] = distance;
            }
        }
        Self { size, values }
    }

    pub(super) fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.size + j]
    }

    pub(super) const fn size(&self) -> usize {
        self.size
    }
}

/// Minimum spanning tree weights from a sequential O(n²) Prim, sorted
/// ascending.
///
/// For single linkage these are exactly the merge heights, whatever order
/// equal weights are processed in.
pub(super) fn prim_mst_weights(matrix: &DistanceMatrix) -> Vec<f64> {
    let size = matrix.size();
    if size == 0 {
        return Vec::new();
    }
    let mut in_tree = vec![false; size];
    let mut best = vec![f64::INFINITY; size];
    let mut weights = Vec::with_capacity(size - 1);
    best[0] = 0.0;

    for step in 0..size {
        let next = (0..size)
            .filter(|&v| !in_tree[v])
            .min_by(|&a, &b| best[a].total_cmp(&best[b]))
            .expect("a vertex remains outside the tree");
        in_tree[next] = true;
        if step > 0 {
            weights.push(best[next]);
        }
        for v in 0..size {
            if !in_tree[v] {
                best[v] = best[v].min(matrix.get(next, v));
            }
        }
    }

    weights.sort_by(f64::total_cmp);
    weights
}

/// Connected components of the graph joining every pair at distance
/// `<= height`, labelled in order of each component's smallest instance.
pub(super) fn threshold_components(matrix: &DistanceMatrix, height: f64) -> Vec<usize> {
    let size = matrix.size();
    let mut labels = vec![usize::MAX; size];
    let mut next_label = 0;
    for start in 0..size {
        if labels[start] != usize::MAX {
            continue;
        }
        labels[start] = next_label;
        let mut stack = vec![start];
        while let Some(u) = stack.pop() {
            for v in 0..size {
                if labels[v] == usize::MAX && matrix.get(u, v) <= height {
                    labels[v] = next_label;
                    stack.push(v);
                }
            }
        }
        next_label += 1;
    }
    labels
}
