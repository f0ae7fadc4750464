//! Human-readable rendering of a solved route.
//!
//! Replays quest consumption along the selected walk and prints one
//! line per stop, annotated with the quest lines advanced there.
//! Display names come from the problem file's name tables; indices
//! stand in where a name is missing.

use questline_core::{Path, replay_quests};

use crate::parse::Problem;

/// Render the route as a step-by-step report.
pub fn render_report(route: &Path, problem: &Problem) -> String {
    let marks = replay_quests(route, &problem.quest_lines);
    let mut out = String::new();
    for (step, mark) in marks.iter().enumerate() {
        let name = problem
            .vertex_names
            .get(&mark.vertex)
            .map_or_else(|| format!("vertex {}", mark.vertex), Clone::clone);
        out.push_str(&format!("{step:>4}  {name}"));
        for &quest in &mark.advanced {
            let quest_name = problem
                .quest_names
                .get(&quest)
                .map_or_else(|| format!("quest {quest}"), Clone::clone);
            out.push_str(&format!("  [{quest_name}]"));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "total length {:.3} over {} stops\n",
        route.length(),
        route.vertices().len()
    ));
    out
}
