//! Property-based tests for the optimization engine.
//!
//! These use `proptest` to assert invariants that must hold for all
//! valid inputs, complementing the scenario tests in the solver
//! module.
//!
//! # Invariants tested
//!
//! - **Symmetry:** collapsing a graph to bidirectional weights yields
//!   a symmetric matrix of pairwise minima.
//! - **Triangle inequality:** exact all-pairs distances never exceed
//!   any two-leg detour.
//! - **Round trip:** reconstructed paths report exactly the computed
//!   distance and chain over finite edges.
//! - **Relaxation law:** the converged result table matches the
//!   minimum over approach-plus-known-solution candidates.
//! - **Walk validity:** any returned route replays to completion and
//!   its fast-travel length equals its hop count.

use std::collections::HashMap;

use proptest::prelude::*;
use questline_core::{
    Graph, Path, QuestLine, QuestSolver, SearchOptions, SolveRequest, UNREACHABLE, Vertex,
    is_unreachable, replay_quests,
};
use questline_solver::{FrontierSolver, ShortestPaths, relax_entries};

const EPSILON: f64 = 1e-9;

/// Random graphs of 2 to 6 vertices with sparse finite weights.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (2_usize..=6).prop_flat_map(|n| {
        proptest::collection::vec(proptest::option::weighted(0.7, 0.5_f64..10.0), n * n).prop_map(
            move |weights| {
                let mut graph = Graph::new(n);
                for (index, weight) in weights.into_iter().enumerate() {
                    let (from, to) = (index / n, index % n);
                    if from != to {
                        if let Some(w) = weight {
                            graph.set_weight(from, to, w).unwrap();
                        }
                    }
                }
                graph
            },
        )
    })
}

/// Quest-line sets referencing only vertices of an `n`-vertex graph.
fn quest_lines_strategy(vertex_count: usize) -> impl Strategy<Value = Vec<QuestLine>> {
    proptest::collection::vec(
        proptest::collection::vec(0..vertex_count, 1..=3).prop_map(QuestLine::new),
        1..=3,
    )
}

/// A random graph paired with quest lines over its vertices.
fn instance_strategy() -> impl Strategy<Value = (Graph, Vec<QuestLine>)> {
    graph_strategy().prop_flat_map(|graph| {
        let vertex_count = graph.vertex_count();
        (Just(graph), quest_lines_strategy(vertex_count))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bidirectional_collapse_is_symmetric(graph in graph_strategy()) {
        let mut collapsed = graph.clone();
        collapsed.make_bidirectional();
        let n = collapsed.vertex_count();
        for i in 0..n {
            for j in 0..n {
                prop_assert_eq!(collapsed.weight(i, j), collapsed.weight(j, i));
                prop_assert!(
                    collapsed.weight(i, j) <= graph.weight(i, j),
                    "collapse may only shorten edges"
                );
            }
        }
    }

    #[test]
    fn exact_distances_satisfy_the_triangle_inequality(graph in graph_strategy()) {
        let paths = ShortestPaths::exact(&graph);
        let n = paths.vertex_count();
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    prop_assert!(
                        paths.distance(i, j) <= paths.distance(i, k) + paths.distance(k, j) + EPSILON,
                        "dist({i}, {j}) detours cheaper through {k}"
                    );
                }
            }
        }
    }

    #[test]
    fn reconstructed_paths_chain_and_match_their_distance(graph in graph_strategy()) {
        let paths = ShortestPaths::exact(&graph);
        let n = paths.vertex_count();
        for i in 0..n {
            for j in 0..n {
                let path = paths.path(i, j);
                if is_unreachable(paths.distance(i, j)) {
                    prop_assert!(path.is_unreachable());
                    continue;
                }
                prop_assert_eq!(path.length(), paths.distance(i, j));
                prop_assert_eq!(path.first(), Some(i));
                prop_assert_eq!(path.last(), Some(j));
                let hop_sum: f64 = path
                    .vertices()
                    .windows(2)
                    .map(|pair| if pair[0] == pair[1] { 0.0 } else { graph.weight(pair[0], pair[1]) })
                    .sum();
                prop_assert!(
                    (hop_sum - path.length()).abs() <= EPSILON,
                    "edge weights along the path must sum to its length"
                );
            }
        }
    }

    #[test]
    fn relaxed_table_matches_the_minimum_candidate_formula(
        graph in graph_strategy(),
        lengths in proptest::collection::vec(0.0_f64..20.0, 1..=3),
    ) {
        let metric = ShortestPaths::exact(&graph);
        let mut table: HashMap<Vertex, Path> = HashMap::new();
        for (offset, length) in lengths.iter().enumerate() {
            let start = offset % metric.vertex_count();
            table.entry(start).or_insert_with(|| Path::new(vec![start], *length));
        }
        let originals: Vec<(Vertex, f64)> = table
            .iter()
            .map(|(start, path)| (*start, path.length()))
            .collect();

        relax_entries(&mut table, &metric);

        for vertex in 0..metric.vertex_count() {
            let expected = originals
                .iter()
                .map(|(start, length)| metric.distance(vertex, *start) + length)
                .fold(UNREACHABLE, f64::min);
            match table.get(&vertex) {
                Some(path) => prop_assert!(
                    (path.length() - expected).abs() <= EPSILON,
                    "entry for {vertex} diverged from the candidate minimum"
                ),
                None => prop_assert!(is_unreachable(expected)),
            }
        }
    }

    #[test]
    fn returned_routes_replay_to_completion(
        (graph, quest_lines) in instance_strategy(),
        seed in any::<u64>(),
    ) {
        let solver = FrontierSolver::new();
        let request = SolveRequest {
            graph,
            quest_lines: quest_lines.clone(),
            options: SearchOptions {
                fast_travel: true,
                seed,
                num_workers: 2,
                ..SearchOptions::default()
            },
        };
        let response = solver.solve(&request).unwrap();

        let route = response.route.expect("fast travel always completes");
        let marks = replay_quests(&route, &quest_lines);
        let consumed: usize = marks.iter().map(|mark| mark.advanced.len()).sum();
        let total: usize = quest_lines.iter().map(QuestLine::remaining).sum();
        prop_assert_eq!(consumed, total, "every quest element must be consumed");
        let hops = route.vertices().len().saturating_sub(1);
        prop_assert!(
            (route.length() - hops as f64).abs() <= EPSILON,
            "fast travel charges exactly one unit per hop"
        );
    }
}
