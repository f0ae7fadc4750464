//! Facade crate for the questline route-optimization engine.
//!
//! This crate re-exports the core domain types and exposes the
//! bounded-frontier solver behind a feature flag.

#![forbid(unsafe_code)]

pub use questline_core::{
    ConfigError, Diagnostics, Graph, GraphError, Path, PathState, PriorityKey, QuestLine,
    QuestMark, QuestSolver, SearchOptions, SolveError, SolveRequest, SolveResponse, UNREACHABLE,
    Vertex, is_unreachable, replay_quests,
};

#[cfg(feature = "solver")]
pub use questline_solver::{Frontier, FrontierSolver, ShortestPaths};
