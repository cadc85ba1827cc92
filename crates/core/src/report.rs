use crate::{DeckLayout, Tally};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimReport {
    pub layout: DeckLayout,
    pub requested: u64,
    pub completed: u64,
    pub successes: u64,
    /// Workers that actually received trials.
    pub workers: usize,
    pub elapsed_ms: u64,
    /// Set only when fewer trials completed than were requested.
    pub cancelled: bool,
}

impl SimReport {
    pub fn new(layout: DeckLayout, tally: Tally, workers: usize, elapsed: Duration) -> Self {
        Self {
            layout,
            requested: tally.requested,
            completed: tally.completed,
            successes: tally.successes,
            workers,
            elapsed_ms: elapsed.as_millis() as u64,
            cancelled: tally.is_partial(),
        }
    }

    pub fn win_rate_percent(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        100.0 * self.successes as f64 / self.completed as f64
    }

    pub fn is_partial(&self) -> bool {
        self.completed < self.requested
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} games won, {:.2}% success rate",
            self.successes,
            self.completed,
            self.win_rate_percent()
        )
    }
}
