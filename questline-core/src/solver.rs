//! The solver seam: configuration, request/response types, and the
//! [`QuestSolver`] trait implemented by optimization engines.

use std::time::Duration;

use thiserror::Error;

use crate::graph::{Graph, Vertex};
use crate::quest::{Path, QuestLine};

/// Tunable options for a single optimization run.
///
/// # Examples
/// ```
/// use questline_core::SearchOptions;
///
/// let options = SearchOptions {
///     fast_travel: true,
///     start: Some(0),
///     ..SearchOptions::default()
/// };
/// assert_eq!(options.num_workers, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Teleport metric: any vertex is reachable from any other at unit
    /// cost, ignoring graph distances.
    pub fast_travel: bool,
    /// Collapse the graph to symmetric weights before searching.
    pub bidirectional: bool,
    /// Pin the final answer to this entry vertex. `None` selects the
    /// global minimum over all entry vertices.
    pub start: Option<Vertex>,
    /// Slack multiplier bounding how many outstanding quest elements a
    /// state may carry, relative to the best seen so far, before it is
    /// discarded instead of expanded. Infinity disables the pruning.
    pub error_afford: f64,
    /// Size of the worker pool.
    pub num_workers: usize,
    /// Capacity of the search frontier; insertions beyond it evict a
    /// random resident state.
    pub max_frontier_size: usize,
    /// Stop once this many completed solutions have been recorded.
    pub target_solution_count: u64,
    /// Seed for the frontier's randomized selection and eviction.
    pub seed: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fast_travel: false,
            bidirectional: true,
            start: None,
            error_afford: f64::INFINITY,
            num_workers: 4,
            max_frontier_size: 100_000,
            target_solution_count: 1,
            seed: 0,
        }
    }
}

/// Configuration rejected before any search work begins.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The worker pool must have at least one worker.
    #[error("num_workers must be at least 1")]
    ZeroWorkers,
    /// The frontier must hold at least one state.
    #[error("max_frontier_size must be at least 1")]
    ZeroFrontierCapacity,
    /// The run must target at least one completed solution.
    #[error("target_solution_count must be at least 1")]
    ZeroSolutionTarget,
    /// The admission slack must be a positive number.
    #[error("error_afford must be positive, got {value}")]
    InvalidErrorAfford {
        /// The rejected multiplier.
        value: f64,
    },
    /// The pinned start vertex does not exist in the graph.
    #[error("start vertex {start} is out of range for a graph of {vertex_count} vertices")]
    StartOutOfRange {
        /// The configured start vertex.
        start: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// A quest line references a vertex the graph does not have.
    #[error(
        "quest line {line} references vertex {vertex}, out of range for a graph of \
         {vertex_count} vertices"
    )]
    QuestVertexOutOfRange {
        /// Index of the offending quest line.
        line: usize,
        /// The out-of-range vertex.
        vertex: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

/// One optimization run: an immutable graph, the quest lines to
/// satisfy, and the options steering the search.
///
/// Solvers take their own copies of the graph and quest lines; the
/// request is never mutated and may be reused across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    /// The weighted graph to walk.
    pub graph: Graph,
    /// Visitation constraints, consumed on per-state copies.
    pub quest_lines: Vec<QuestLine>,
    /// Search tuning.
    pub options: SearchOptions,
}

impl SolveRequest {
    /// Reject malformed configuration before any search work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let options = &self.options;
        if options.num_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if options.max_frontier_size == 0 {
            return Err(ConfigError::ZeroFrontierCapacity);
        }
        if options.target_solution_count == 0 {
            return Err(ConfigError::ZeroSolutionTarget);
        }
        if !(options.error_afford > 0.0) {
            return Err(ConfigError::InvalidErrorAfford {
                value: options.error_afford,
            });
        }
        let vertex_count = self.graph.vertex_count();
        if let Some(start) = options.start {
            if start >= vertex_count {
                return Err(ConfigError::StartOutOfRange {
                    start,
                    vertex_count,
                });
            }
        }
        for (index, line) in self.quest_lines.iter().enumerate() {
            if let Some(vertex) = line.stops().find(|&stop| stop >= vertex_count) {
                return Err(ConfigError::QuestVertexOutOfRange {
                    line: index,
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Bookkeeping from a solve run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall time spent in the run.
    pub solve_time: Duration,
    /// Search states admitted and expanded.
    pub states_expanded: u64,
    /// Completed solutions recorded by workers.
    pub solutions_recorded: u64,
}

/// Outcome of a solve run.
///
/// `route` is `None` when no completed solution was found — an absent
/// result, not an error condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The selected minimum-length walk, if any was found.
    pub route: Option<Path>,
    /// Run bookkeeping.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`QuestSolver::solve`].
#[derive(Debug, Error, PartialEq)]
pub enum SolveError {
    /// The request carried malformed configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Find a minimum-length walk satisfying every quest line.
///
/// Implementations are heuristic: the returned walk satisfies all
/// constraints but is not guaranteed optimal. Solvers must be
/// `Send + Sync` to operate safely across threads.
pub trait QuestSolver: Send + Sync {
    /// Run one optimization, producing the selected walk or a
    /// configuration error.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
