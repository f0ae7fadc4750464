//! The bounded, randomized search frontier.
//!
//! Holds the not-yet-expanded [`PathState`]s, ordered by
//! [`PriorityKey`] and bounded by a configured capacity. Both removal
//! and eviction pick a uniformly random member: a greedy best-first
//! pop would serialize every worker on the same minimal state, so
//! randomized selection trades optimality for parallel throughput and
//! exploration diversity.
//!
//! The frontier keeps a single representative per priority key. Two
//! states with equal keys are interchangeable for ordering purposes
//! even when their paths or remaining quests differ; retaining one of
//! them is a deliberate scalability trade-off rather than
//! content-level deduplication. The representative is chosen by coin
//! flip on each collision so that ties never systematically favour
//! insertion order, which on uniform-weight graphs would steer every
//! expansion toward the same sibling.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use questline_core::{PathState, PriorityKey};

/// A capacity-limited, key-ordered multiset of search states with
/// randomized selection and eviction.
///
/// # Examples
///
/// ```
/// use questline_core::{Path, PathState, QuestLine};
/// use questline_solver::Frontier;
///
/// let mut frontier = Frontier::new(8, 42);
/// frontier.insert(PathState::new(
///     0,
///     Path::empty(),
///     vec![QuestLine::new([1])],
/// ));
/// assert_eq!(frontier.len(), 1);
/// assert!(frontier.take_one().is_some());
/// assert!(frontier.is_empty());
/// ```
pub struct Frontier {
    states: BTreeMap<PriorityKey, PathState>,
    capacity: usize,
    rng: StdRng,
}

impl Frontier {
    /// Create a frontier holding at most `capacity` states, with the
    /// given randomization seed.
    #[must_use]
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            states: BTreeMap::new(),
            capacity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of states currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` when no states remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Add a state.
    ///
    /// When the state's priority key is already present, a coin flip
    /// decides which of the two states stays as the key's
    /// representative. At capacity, a uniformly random resident is
    /// evicted first.
    pub fn insert(&mut self, state: PathState) {
        let key = state.priority_key();
        if let Some(existing) = self.states.get_mut(&key) {
            if self.rng.gen_bool(0.5) {
                *existing = state;
            }
            return;
        }
        if self.states.len() == self.capacity {
            self.evict_one();
        }
        self.states.insert(key, state);
    }

    /// Remove and return a uniformly random state.
    ///
    /// Deliberately not a best-first pop; see the module docs.
    pub fn take_one(&mut self) -> Option<PathState> {
        let key = self.random_key()?;
        self.states.remove(&key)
    }

    /// Drop a uniformly random state to make room. A no-op on an
    /// empty frontier.
    pub fn evict_one(&mut self) {
        if let Some(victim) = self.random_key() {
            self.states.remove(&victim);
        }
    }

    fn random_key(&mut self) -> Option<PriorityKey> {
        if self.states.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.states.len());
        self.states.keys().nth(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_core::{Path, QuestLine};
    use rstest::rstest;

    fn state_with(outstanding_stops: &[usize], length: f64) -> PathState {
        PathState::new(
            0,
            Path::new(Vec::new(), length),
            vec![QuestLine::new(outstanding_stops.iter().copied())],
        )
    }

    #[rstest]
    fn capacity_is_never_exceeded() {
        let mut frontier = Frontier::new(3, 7);
        for i in 0..10 {
            frontier.insert(state_with(&[1], f64::from(i)));
        }
        assert_eq!(frontier.len(), 3);
    }

    #[rstest]
    fn equal_keys_keep_one_representative() {
        let mut frontier = Frontier::new(8, 7);
        frontier.insert(state_with(&[1], 2.0));
        frontier.insert(state_with(&[2], 2.0));
        frontier.insert(state_with(&[1], 2.0));
        assert_eq!(frontier.len(), 1);
    }

    #[rstest]
    fn take_one_drains_the_frontier() {
        let mut frontier = Frontier::new(8, 7);
        for i in 0..5 {
            frontier.insert(state_with(&[1], f64::from(i)));
        }
        let mut drained = 0;
        while frontier.take_one().is_some() {
            drained += 1;
        }
        assert_eq!(drained, 5);
        assert!(frontier.is_empty());
        assert!(frontier.take_one().is_none());
    }

    #[rstest]
    fn capacity_one_always_holds_the_latest_distinct_key() {
        let mut frontier = Frontier::new(1, 7);
        frontier.insert(state_with(&[1], 1.0));
        frontier.insert(state_with(&[1], 2.0));
        assert_eq!(frontier.len(), 1);
        let survivor = frontier.take_one().unwrap();
        assert_eq!(survivor.path().length(), 2.0);
    }
}
