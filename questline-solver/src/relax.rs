//! Post-search global relaxation of the per-start result table.
//!
//! Workers only record completed solutions for the vertices the
//! search actually started from. The relaxation pass extends that
//! table to every vertex as a possible entry point: reaching a known
//! good solution is itself a shortest-path problem over a derived
//! graph whose edges jump to vertices that already have one.

use std::collections::HashMap;

use questline_core::{Path, UNREACHABLE, Vertex, is_unreachable};

use crate::apsp::ShortestPaths;

/// Relax `table` to a fixpoint over the all-pairs metric.
///
/// For every vertex `v` and every known entry `(s, path)`, the
/// candidate `shortest(v, s) ++ path` replaces `table[v]` when it is
/// strictly shorter or no entry exists yet. Each replacement strictly
/// decreases a bounded non-negative length, so the pass converges; a
/// round without changes terminates it.
pub fn relax_entries(table: &mut HashMap<Vertex, Path>, metric: &ShortestPaths) {
    if table.is_empty() {
        return;
    }
    let mut changed = true;
    while changed {
        changed = false;
        let snapshot: Vec<(Vertex, Path)> = table
            .iter()
            .map(|(start, path)| (*start, path.clone()))
            .collect();
        for entry_vertex in 0..metric.vertex_count() {
            for (known_start, known_path) in &snapshot {
                let approach = metric.distance(entry_vertex, *known_start);
                if is_unreachable(approach) {
                    continue;
                }
                let candidate_length = approach + known_path.length();
                let current_length = table
                    .get(&entry_vertex)
                    .map_or(UNREACHABLE, Path::length);
                if candidate_length < current_length {
                    let candidate = metric.path(entry_vertex, *known_start).join(known_path);
                    table.insert(entry_vertex, candidate);
                    changed = true;
                }
            }
        }
    }
}
