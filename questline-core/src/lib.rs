//! Core domain types for the questline routing engine.
//!
//! A questline problem asks for a minimum-length walk over a weighted
//! directed graph that visits the stops of every quest line in order.
//! This crate holds the shared vocabulary: the [`Graph`], the ordered
//! [`QuestLine`] constraints, the [`Path`] value accumulated during
//! search, the [`PathState`] explored by solvers, and the request,
//! response and error types at the solver seam. Constructors return
//! `Result` to surface invalid input early; solver implementations live
//! in the companion `questline-solver` crate.

#![forbid(unsafe_code)]

pub mod graph;
pub mod quest;
pub mod report;
pub mod solver;
pub mod state;

pub use graph::{Graph, GraphError, UNREACHABLE, Vertex, is_unreachable};
pub use quest::{Path, QuestLine};
pub use report::{QuestMark, replay_quests};
pub use solver::{
    ConfigError, Diagnostics, QuestSolver, SearchOptions, SolveError, SolveRequest, SolveResponse,
};
pub use state::{PathState, PriorityKey};
