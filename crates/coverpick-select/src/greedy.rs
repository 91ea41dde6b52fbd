//! Lazy-greedy maximization of the facility-location objective.
//!
//! One parametrized loop serves both stopping policies ([`StopRule`]); only
//! the after-acceptance check differs. Laziness: each not-yet-selected item
//! sits in a max-heap under the gain computed at some earlier epoch. Because
//! coverage only grows, that stored gain is an upper bound on the true gain,
//! so a popped entry whose gain is fresh (same epoch) beats every other
//! candidate without recomputing them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use coverpick_core::{SimilarityMatrix, StopRule};

use crate::coverage::CoverageTracker;

/// Heap entry: an upper bound on one candidate's marginal gain.
///
/// `epoch` is the iteration at which `gain` was computed; an entry popped at
/// a later epoch is stale and must be refreshed before it can win.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    gain: f32,
    epoch: usize,
    index: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Largest gain first; equal gains break toward the smaller index so
        // selection order is reproducible.
        self.gain
            .total_cmp(&other.gain)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Output of one greedy run.
#[derive(Debug, Clone)]
pub struct GreedyRun {
    /// Accepted indices, in selection order.
    pub selected: Vec<usize>,
    /// Mean coverage after each acceptance.
    pub objective_trajectory: Vec<f32>,
    /// For [`StopRule::SaturationThreshold`]: the prefix length whose last
    /// gain still cleared the threshold, if the run saturated early. The
    /// below-threshold acceptance stays in `selected` and the trajectory so
    /// callers can inspect it.
    pub saturated_at: Option<usize>,
}

/// Greedy selection over a prebuilt similarity matrix.
///
/// All per-run state (coverage, heap, selection) lives inside
/// [`Selector::run`]; a matrix can be reused across runs with different
/// stopping rules.
#[derive(Debug)]
pub struct Selector<'a> {
    matrix: &'a SimilarityMatrix,
}

impl<'a> Selector<'a> {
    pub fn new(matrix: &'a SimilarityMatrix) -> Self {
        Self { matrix }
    }

    pub fn run(&self, rule: StopRule) -> GreedyRun {
        let n = self.matrix.len();
        let max_picks = match rule {
            StopRule::FixedCount(k) => k.min(n),
            StopRule::SaturationThreshold(_) => n,
        };

        let mut tracker = CoverageTracker::new(n);
        let mut queue: BinaryHeap<QueueEntry> = (0..n)
            .map(|index| QueueEntry {
                gain: tracker.marginal_gain(self.matrix.row(index)),
                epoch: 0,
                index,
            })
            .collect();

        let mut picked = vec![false; n];
        let mut selected = Vec::with_capacity(max_picks);
        let mut objective_trajectory = Vec::with_capacity(max_picks);
        let mut saturated_at = None;

        'select: for epoch in 0..max_picks {
            let accepted = loop {
                let Some(mut entry) = queue.pop() else {
                    break 'select;
                };
                if picked[entry.index] {
                    continue;
                }
                if entry.epoch == epoch {
                    break entry;
                }
                // Stale upper bound: refresh against current coverage and let
                // the heap re-rank it within this same iteration.
                entry.gain = tracker.marginal_gain(self.matrix.row(entry.index));
                entry.epoch = epoch;
                queue.push(entry);
            };

            picked[accepted.index] = true;
            selected.push(accepted.index);
            tracker.absorb(self.matrix.row(accepted.index));
            objective_trajectory.push(tracker.objective());

            if let StopRule::SaturationThreshold(threshold) = rule {
                let t = objective_trajectory.len();
                if t >= 2 && objective_trajectory[t - 1] - objective_trajectory[t - 2] < threshold {
                    saturated_at = Some(t - 1);
                    break;
                }
            }
        }

        GreedyRun {
            selected,
            objective_trajectory,
            saturated_at,
        }
    }
}
