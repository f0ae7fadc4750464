//! Replay quest consumption along a finished walk.
//!
//! Reporting front ends need to know which quest lines advance at each
//! step of the selected path. The replay applies the same rule the
//! search does: visiting a vertex consumes the head of every active
//! line waiting there, one element per line per visit.

use crate::graph::Vertex;
use crate::quest::{Path, QuestLine};

/// One step of the walk and the quest lines it advanced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestMark {
    /// The vertex visited at this step.
    pub vertex: Vertex,
    /// Indices into the original quest-line set whose head was
    /// consumed here.
    pub advanced: Vec<usize>,
}

/// Replay quest-line consumption along `path` in vertex order.
///
/// Works on local copies; the caller's quest lines are untouched.
///
/// # Examples
///
/// ```
/// use questline_core::{Path, QuestLine, replay_quests};
///
/// let path = Path::new(vec![0, 1, 2], 2.0);
/// let lines = vec![QuestLine::new([1, 2]), QuestLine::new([2])];
/// let marks = replay_quests(&path, &lines);
/// assert_eq!(marks[1].advanced, vec![0]);
/// assert_eq!(marks[2].advanced, vec![0, 1]);
/// ```
#[must_use]
pub fn replay_quests(path: &Path, quest_lines: &[QuestLine]) -> Vec<QuestMark> {
    let mut lines: Vec<QuestLine> = quest_lines.to_vec();
    path.vertices()
        .iter()
        .map(|&vertex| {
            let advanced = lines
                .iter_mut()
                .enumerate()
                .filter_map(|(index, line)| {
                    (line.head() == Some(vertex)).then(|| {
                        line.advance();
                        index
                    })
                })
                .collect();
            QuestMark { vertex, advanced }
        })
        .collect()
}
