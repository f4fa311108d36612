//! Rolling snapshot history used to detect repeated play.

use crate::types::Square;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Number of snapshots kept.
pub const HISTORY_LEN: usize = 8;

const HALF: usize = HISTORY_LEN / 2;

/// Circular buffer of the last eight board snapshots.
///
/// Every eighth recorded mutation closes a window: if the first four
/// snapshots of the window equal the last four, slot by slot, the
/// repetition count increments; otherwise it resets to zero. This is a
/// fixed period-4 cycle check, evaluated on window boundaries only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct History {
    slots: [Vec<Square>; HISTORY_LEN],
    recorded: usize,
    repeats: usize,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot and updates the repetition count on window boundaries.
    #[instrument(level = "trace", skip_all, fields(recorded = self.recorded))]
    pub fn record(&mut self, snapshot: &[Square]) {
        let slot = self.recorded % HISTORY_LEN;
        self.slots[slot] = snapshot.to_vec();

        if slot == HISTORY_LEN - 1 {
            if self.slots[..HALF] == self.slots[HALF..] {
                self.repeats += 1;
                debug!(repeats = self.repeats, "Repeated cycle detected");
            } else {
                self.repeats = 0;
            }
        }
        self.recorded += 1;
    }

    /// Number of consecutive windows whose halves matched.
    pub fn repeats(&self) -> usize {
        self.repeats
    }

    /// Total mutations recorded.
    pub fn recorded(&self) -> usize {
        self.recorded
    }
}
