//! Weighted directed graphs over integer vertex indices.
//!
//! Vertices are dense indices `0..n`; display names are a presentation
//! concern handled elsewhere. Edge weights are non-negative `f64`
//! values stored in an `n x n` matrix, with [`UNREACHABLE`] marking the
//! absence of an edge. The diagonal is always zero: staying put costs
//! nothing.

use thiserror::Error;

/// Index of a vertex in a [`Graph`].
pub type Vertex = usize;

/// Sentinel weight for a pair of vertices with no connecting edge.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Returns `true` when `weight` is the [`UNREACHABLE`] sentinel.
#[must_use]
pub fn is_unreachable(weight: f64) -> bool {
    weight.is_infinite()
}

/// Errors returned by [`Graph::set_weight`].
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// A vertex index was outside `0..vertex_count`.
    #[error("vertex {vertex} is out of range for a graph of {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending index.
        vertex: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge weight was negative, NaN or infinite.
    #[error("edge weight must be a non-negative finite number, got {weight}")]
    InvalidWeight {
        /// The rejected weight.
        weight: f64,
    },
}

/// A weighted directed adjacency matrix.
///
/// # Examples
///
/// ```
/// use questline_core::{Graph, UNREACHABLE};
///
/// # fn main() -> Result<(), questline_core::GraphError> {
/// let mut graph = Graph::new(3);
/// graph.set_weight(0, 1, 2.5)?;
/// assert_eq!(graph.weight(0, 1), 2.5);
/// assert_eq!(graph.weight(1, 0), UNREACHABLE);
/// assert_eq!(graph.weight(2, 2), 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    weights: Vec<Vec<f64>>,
}

impl Graph {
    /// Create a graph of `vertex_count` vertices with no edges.
    ///
    /// Every off-diagonal pair starts [`UNREACHABLE`]; the diagonal is
    /// zero.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        let weights = (0..vertex_count)
            .map(|i| {
                (0..vertex_count)
                    .map(|j| if i == j { 0.0 } else { UNREACHABLE })
                    .collect()
            })
            .collect();
        Self { weights }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.weights.len()
    }

    /// Weight of the edge `from -> to`.
    ///
    /// Out-of-range pairs read as [`UNREACHABLE`] rather than panicking.
    #[must_use]
    pub fn weight(&self, from: Vertex, to: Vertex) -> f64 {
        self.weights
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(UNREACHABLE)
    }

    /// Set the weight of the edge `from -> to`.
    pub fn set_weight(&mut self, from: Vertex, to: Vertex, weight: f64) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        let cell = self
            .weights
            .get_mut(from)
            .ok_or(GraphError::VertexOutOfRange {
                vertex: from,
                vertex_count,
            })?
            .get_mut(to)
            .ok_or(GraphError::VertexOutOfRange {
                vertex: to,
                vertex_count,
            })?;
        if weight.is_nan() || weight < 0.0 || weight.is_infinite() {
            return Err(GraphError::InvalidWeight { weight });
        }
        *cell = weight;
        Ok(())
    }

    /// Iterate the finite-cost neighbours of `from`, excluding `from`
    /// itself.
    pub fn neighbors(&self, from: Vertex) -> impl Iterator<Item = (Vertex, f64)> + '_ {
        self.weights
            .get(from)
            .into_iter()
            .flat_map(move |row| {
                row.iter()
                    .copied()
                    .enumerate()
                    .filter(move |&(to, weight)| to != from && !is_unreachable(weight))
            })
    }

    /// Collapse the graph to symmetric weights.
    ///
    /// Replaces `w(i, j)` with `min(w(i, j), w(j, i))` for every pair.
    /// This is a one-time preprocessing step, not a live mutation: the
    /// original asymmetric weights are lost.
    pub fn make_bidirectional(&mut self) {
        for i in 0..self.vertex_count() {
            for j in (i + 1)..self.vertex_count() {
                let collapsed = self.weight(i, j).min(self.weight(j, i));
                self.weights[i][j] = collapsed;
                self.weights[j][i] = collapsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_graph_has_zero_diagonal_and_no_edges() {
        let graph = Graph::new(3);
        for i in 0..3 {
            for j in 0..3 {
                if i == j {
                    assert_eq!(graph.weight(i, j), 0.0);
                } else {
                    assert!(is_unreachable(graph.weight(i, j)));
                }
            }
        }
    }

    #[rstest]
    fn set_weight_rejects_out_of_range_vertex() {
        let mut graph = Graph::new(2);
        let err = graph.set_weight(0, 5, 1.0).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                vertex: 5,
                vertex_count: 2
            }
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn set_weight_rejects_invalid_weight(#[case] weight: f64) {
        let mut graph = Graph::new(2);
        assert!(graph.set_weight(0, 1, weight).is_err());
    }

    #[rstest]
    fn out_of_range_reads_are_unreachable() {
        let graph = Graph::new(2);
        assert!(is_unreachable(graph.weight(0, 9)));
        assert!(is_unreachable(graph.weight(9, 0)));
    }

    #[rstest]
    fn neighbors_skip_self_and_missing_edges() {
        let mut graph = Graph::new(3);
        graph.set_weight(0, 1, 4.0).unwrap();
        graph.set_weight(0, 2, 1.5).unwrap();
        let neighbors: Vec<(Vertex, f64)> = graph.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 4.0), (2, 1.5)]);
        assert_eq!(graph.neighbors(1).count(), 0);
    }

    #[rstest]
    fn make_bidirectional_takes_pairwise_minimum() {
        let mut graph = Graph::new(3);
        graph.set_weight(0, 1, 5.0).unwrap();
        graph.set_weight(1, 0, 2.0).unwrap();
        graph.set_weight(1, 2, 7.0).unwrap();
        graph.make_bidirectional();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(graph.weight(i, j), graph.weight(j, i));
            }
        }
        assert_eq!(graph.weight(0, 1), 2.0);
        assert_eq!(graph.weight(1, 2), 7.0);
        assert_eq!(graph.weight(2, 1), 7.0);
    }
}
