//! `FrontierSolver`: bounded-frontier randomized best-first search.
//!
//! A fixed pool of workers repeatedly takes a random state from the
//! shared [`Frontier`], advances it, and either records a completed
//! solution in the per-start result table or inserts successor states.
//! Every read-modify-write touching the frontier or the table happens
//! inside one mutual-exclusion critical section: pop, quest
//! consumption, table update and successor insertion are a single
//! atomic step, and no worker ever observes a half-updated state.
//!
//! The pool stops when the completed-solution counter reaches the
//! configured target, when the external cancellation flag is raised,
//! or when the frontier is exhausted with every worker idle. Workers
//! re-check between expansions; cancellation is cooperative and never
//! interrupts an expansion in flight. All workers join before the
//! relaxation pass reads the table.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Instant;

use questline_core::{
    Diagnostics, Graph, Path, PathState, QuestLine, QuestSolver, SolveError, SolveRequest,
    SolveResponse, Vertex,
};

use crate::apsp::ShortestPaths;
use crate::frontier::Frontier;
use crate::relax::relax_entries;

/// Heuristic quest-route solver backed by the bounded randomized
/// frontier search.
///
/// A solver value is reusable across runs; each [`solve`] call owns
/// fresh copies of the request's graph and quest lines. The
/// cancellation flag from [`FrontierSolver::cancellation_flag`] stops
/// an in-progress run cooperatively.
///
/// [`solve`]: QuestSolver::solve
pub struct FrontierSolver {
    cancel: Arc<AtomicBool>,
}

impl FrontierSolver {
    /// Create a solver with an unraised cancellation flag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops further expansion when set.
    ///
    /// Workers check it between expansions; an expansion already in
    /// flight completes normally and is never rolled back.
    #[must_use]
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }
}

impl Default for FrontierSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestSolver for FrontierSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        request.validate()?;
        let started_at = Instant::now();
        let options = &request.options;

        let mut graph = request.graph.clone();
        if options.bidirectional {
            graph.make_bidirectional();
        }
        let metric = if options.fast_travel {
            ShortestPaths::teleport(graph.vertex_count())
        } else {
            ShortestPaths::exact(&graph)
        };

        let quests: Vec<QuestLine> = request
            .quest_lines
            .iter()
            .filter(|line| !line.is_complete())
            .cloned()
            .collect();
        if quests.is_empty() {
            // Nothing to visit: trivially complete.
            let route = Path::new(options.start.into_iter().collect(), 0.0);
            return Ok(SolveResponse {
                route: Some(route),
                diagnostics: Diagnostics {
                    solve_time: started_at.elapsed(),
                    ..Diagnostics::default()
                },
            });
        }

        let total_outstanding: usize = quests.iter().map(QuestLine::remaining).sum();
        let mut frontier = Frontier::new(options.max_frontier_size, options.seed);
        for line in &quests {
            if frontier.len() == graph.vertex_count() {
                break;
            }
            if let Some(head) = line.head() {
                frontier.insert(PathState::new(head, Path::empty(), quests.clone()));
            }
        }
        log::debug!(
            "frontier seeded with {} states for {} quest elements",
            frontier.len(),
            total_outstanding
        );

        let driver = Driver {
            graph: &graph,
            fast_travel: options.fast_travel,
            error_afford: options.error_afford,
            target: options.target_solution_count,
            workers: options.num_workers,
            cancel: self.cancel.as_ref(),
            shared: Mutex::new(SearchShared {
                frontier,
                results: HashMap::new(),
                completed: 0,
                expanded: 0,
                min_outstanding: total_outstanding,
                idle: 0,
                finished: false,
            }),
            progress: Condvar::new(),
        };
        std::thread::scope(|scope| {
            for _ in 0..options.num_workers {
                scope.spawn(|| driver.run_worker());
            }
        });

        let shared = driver
            .shared
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let SearchShared {
            mut results,
            completed,
            expanded,
            ..
        } = shared;
        log::debug!(
            "search finished: {expanded} states expanded, {completed} solutions, \
             {} start vertices",
            results.len()
        );

        relax_entries(&mut results, &metric);
        let route = select_result(options.start, &results);
        Ok(SolveResponse {
            route,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                states_expanded: expanded,
                solutions_recorded: completed,
            },
        })
    }
}

/// Pick the final answer from the relaxed result table.
fn select_result(start: Option<Vertex>, results: &HashMap<Vertex, Path>) -> Option<Path> {
    match start {
        Some(vertex) => results.get(&vertex).cloned(),
        None => results
            .values()
            .min_by(|a, b| a.length().total_cmp(&b.length()))
            .cloned(),
    }
}

/// Mutable state shared by the worker pool, guarded by one lock.
struct SearchShared {
    frontier: Frontier,
    results: HashMap<Vertex, Path>,
    completed: u64,
    expanded: u64,
    min_outstanding: usize,
    idle: usize,
    finished: bool,
}

struct Driver<'a> {
    graph: &'a Graph,
    fast_travel: bool,
    error_afford: f64,
    target: u64,
    workers: usize,
    cancel: &'a AtomicBool,
    shared: Mutex<SearchShared>,
    progress: Condvar,
}

impl Driver<'_> {
    fn run_worker(&self) {
        loop {
            let mut shared = self
                .shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let state = loop {
                if shared.finished
                    || self.cancel.load(Ordering::Relaxed)
                    || shared.completed >= self.target
                {
                    shared.finished = true;
                    self.progress.notify_all();
                    return;
                }
                if let Some(state) = shared.frontier.take_one() {
                    break state;
                }
                // Frontier drained. If every peer is also waiting no
                // successor can ever appear, so the search is over.
                shared.idle += 1;
                if shared.idle == self.workers {
                    shared.finished = true;
                    self.progress.notify_all();
                    return;
                }
                shared = self
                    .progress
                    .wait(shared)
                    .unwrap_or_else(PoisonError::into_inner);
                shared.idle -= 1;
            };
            self.expand(&mut shared, state);
            self.progress.notify_all();
        }
    }

    /// One expansion step, performed entirely inside the critical
    /// section: arrival, admission, quest consumption, and either the
    /// result-table update or successor insertion.
    fn expand(&self, shared: &mut SearchShared, mut state: PathState) {
        state.arrive();
        let budget = to_f64(shared.min_outstanding.max(1)) * self.error_afford;
        if to_f64(state.outstanding()) > budget {
            // Too far behind the best seen; discard without expansion.
            return;
        }
        shared.expanded += 1;
        state.consume_at_current();
        let remaining = state.outstanding();

        if state.is_complete() {
            shared.completed += 1;
            if let Some(start) = state.path().first() {
                let path = state.into_path();
                let improves = shared
                    .results
                    .get(&start)
                    .is_none_or(|known| path.length() < known.length());
                if improves {
                    log::trace!(
                        "new best for start {start}: length {}",
                        path.length()
                    );
                    shared.results.insert(start, path);
                }
            }
        } else if self.fast_travel {
            for head in state.remaining_heads() {
                shared.frontier.insert(state.branch_to(head, 1.0));
            }
        } else {
            for (neighbor, weight) in self.graph.neighbors(state.current()) {
                shared.frontier.insert(state.branch_to(neighbor, weight));
            }
        }
        shared.min_outstanding = shared.min_outstanding.min(remaining);
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "quest element counts are far below 2^52"
)]
fn to_f64(count: usize) -> f64 {
    count as f64
}
