//! All-pairs shortest paths over the search graph.
//!
//! The engine consults pairwise distances twice: while splicing
//! per-start results together in the relaxation pass, and for
//! reconstructing the spliced prefixes vertex by vertex. Exact mode
//! runs the classic triple-nested relaxation once per solve, `O(n^3)`
//! time and `O(n^2)` space, which is why vertex counts are expected to
//! stay in the low thousands. Fast-travel mode replaces the metric
//! with a unit-cost clique and needs no precomputation at all.
//!
//! Unreachable pairs are values, not errors: they read as an infinite
//! distance and reconstruct to the sentinel [`Path::unreachable`].

use questline_core::{Graph, Path, UNREACHABLE, Vertex, is_unreachable};

enum Metric {
    /// Every vertex reaches every other at unit cost.
    Teleport { vertex_count: usize },
    /// Relaxed distance matrix plus a successor table for
    /// reconstruction.
    Exact {
        dist: Vec<Vec<f64>>,
        next: Vec<Vec<Option<Vertex>>>,
    },
}

/// Precomputed minimum-length paths for every ordered vertex pair.
///
/// # Examples
///
/// ```
/// use questline_core::Graph;
/// use questline_solver::ShortestPaths;
///
/// let mut graph = Graph::new(3);
/// graph.set_weight(0, 1, 1.0).unwrap();
/// graph.set_weight(1, 2, 1.0).unwrap();
/// let paths = ShortestPaths::exact(&graph);
/// assert_eq!(paths.distance(0, 2), 2.0);
/// assert_eq!(paths.path(0, 2).vertices(), &[0, 1, 2]);
/// ```
pub struct ShortestPaths {
    metric: Metric,
}

impl ShortestPaths {
    /// The fast-travel metric: unit cost between any two distinct
    /// vertices, zero to stay put.
    #[must_use]
    pub fn teleport(vertex_count: usize) -> Self {
        Self {
            metric: Metric::Teleport { vertex_count },
        }
    }

    /// Relax the graph's distance matrix over every intermediate
    /// vertex, recording successors for path reconstruction.
    #[must_use]
    pub fn exact(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut dist = vec![vec![UNREACHABLE; n]; n];
        let mut next: Vec<Vec<Option<Vertex>>> = vec![vec![None; n]; n];
        for i in 0..n {
            for j in 0..n {
                let weight = if i == j { 0.0 } else { graph.weight(i, j) };
                if !is_unreachable(weight) {
                    dist[i][j] = weight;
                    next[i][j] = Some(j);
                }
            }
        }
        for k in 0..n {
            for i in 0..n {
                if is_unreachable(dist[i][k]) {
                    continue;
                }
                for j in 0..n {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                        next[i][j] = next[i][k];
                    }
                }
            }
        }
        Self {
            metric: Metric::Exact { dist, next },
        }
    }

    /// Number of vertices the metric covers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match &self.metric {
            Metric::Teleport { vertex_count } => *vertex_count,
            Metric::Exact { dist, .. } => dist.len(),
        }
    }

    /// Minimum distance from `from` to `to`, or [`UNREACHABLE`].
    #[must_use]
    pub fn distance(&self, from: Vertex, to: Vertex) -> f64 {
        match &self.metric {
            Metric::Teleport { vertex_count } => {
                if from >= *vertex_count || to >= *vertex_count {
                    UNREACHABLE
                } else if from == to {
                    0.0
                } else {
                    1.0
                }
            }
            Metric::Exact { dist, .. } => dist
                .get(from)
                .and_then(|row| row.get(to))
                .copied()
                .unwrap_or(UNREACHABLE),
        }
    }

    /// Reconstruct the minimum-length path from `from` to `to` by
    /// repeated successor lookup. Unreachable pairs yield the
    /// infinite-length sentinel.
    #[must_use]
    pub fn path(&self, from: Vertex, to: Vertex) -> Path {
        match &self.metric {
            Metric::Teleport { vertex_count } => {
                if from >= *vertex_count || to >= *vertex_count {
                    Path::unreachable()
                } else if from == to {
                    Path::new(vec![from], 0.0)
                } else {
                    Path::new(vec![from, to], 1.0)
                }
            }
            Metric::Exact { dist, next } => {
                let length = self.distance(from, to);
                if is_unreachable(length) {
                    return Path::unreachable();
                }
                let mut vertices = vec![from];
                let mut current = from;
                while current != to {
                    let Some(step) = next.get(current).and_then(|row| row.get(to)).copied().flatten()
                    else {
                        return Path::unreachable();
                    };
                    vertices.push(step);
                    current = step;
                }
                debug_assert!(vertices.len() <= dist.len());
                Path::new(vertices, length)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn diamond() -> Graph {
        // 0 -> 1 -> 3 is cheaper than the direct 0 -> 3 edge.
        let mut graph = Graph::new(4);
        graph.set_weight(0, 1, 1.0).unwrap();
        graph.set_weight(1, 3, 1.0).unwrap();
        graph.set_weight(0, 3, 5.0).unwrap();
        graph.set_weight(0, 2, 2.0).unwrap();
        graph.set_weight(2, 3, 2.0).unwrap();
        graph
    }

    #[rstest]
    fn exact_mode_relaxes_through_intermediates() {
        let paths = ShortestPaths::exact(&diamond());
        assert_eq!(paths.distance(0, 3), 2.0);
        assert_eq!(paths.path(0, 3).vertices(), &[0, 1, 3]);
    }

    #[rstest]
    fn exact_mode_satisfies_triangle_inequality() {
        let paths = ShortestPaths::exact(&diamond());
        let n = paths.vertex_count();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    assert!(paths.distance(i, j) <= paths.distance(i, k) + paths.distance(k, j));
                }
            }
        }
    }

    #[rstest]
    fn reconstructed_path_length_matches_distance() {
        let paths = ShortestPaths::exact(&diamond());
        let n = paths.vertex_count();
        for i in 0..n {
            for j in 0..n {
                let path = paths.path(i, j);
                if is_unreachable(paths.distance(i, j)) {
                    assert!(path.is_unreachable());
                } else {
                    assert_eq!(path.length(), paths.distance(i, j));
                    assert_eq!(path.first(), Some(i));
                    assert_eq!(path.last(), Some(j));
                }
            }
        }
    }

    #[rstest]
    fn unreachable_pair_is_a_sentinel_not_an_error() {
        let paths = ShortestPaths::exact(&diamond());
        assert!(is_unreachable(paths.distance(3, 0)));
        assert!(paths.path(3, 0).is_unreachable());
    }

    #[rstest]
    fn teleport_metric_is_a_unit_clique() {
        let paths = ShortestPaths::teleport(3);
        assert_eq!(paths.distance(0, 2), 1.0);
        assert_eq!(paths.distance(1, 1), 0.0);
        assert_eq!(paths.path(0, 2).vertices(), &[0, 2]);
        assert_eq!(paths.path(1, 1).vertices(), &[1]);
        assert!(is_unreachable(paths.distance(0, 5)));
    }

    #[rstest]
    fn self_distance_is_zero() {
        let paths = ShortestPaths::exact(&diamond());
        for i in 0..paths.vertex_count() {
            assert_eq!(paths.distance(i, i), 0.0);
            assert_eq!(paths.path(i, i).vertices(), &[i]);
        }
    }
}
