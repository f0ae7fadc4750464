//! The questline optimization engine.
//!
//! Implements [`questline_core::QuestSolver`] with a bounded-frontier
//! randomized best-first search: an all-pairs shortest-path
//! precomputation ([`ShortestPaths`]), a capacity-limited randomized
//! [`Frontier`] of partial routes, a fixed pool of workers expanding
//! states under one mutual-exclusion lock, a post-search relaxation
//! pass splicing per-start results together over the all-pairs
//! distances, and a final result selection.

#![forbid(unsafe_code)]

pub mod apsp;
pub mod frontier;
pub mod relax;
mod solver;

pub use apsp::ShortestPaths;
pub use frontier::Frontier;
pub use relax::relax_entries;
pub use solver::FrontierSolver;
