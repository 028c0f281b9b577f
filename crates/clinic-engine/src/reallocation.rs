//! Bounded batch reallocation counter.
//!
//! The counter simulates working through the high-risk population in fixed
//! batches. Its upper bound is the high-risk count of whatever view is
//! current, so the bound can move between triggers while the counter itself
//! only changes through [`BatchReallocator::advance`] and
//! [`BatchReallocator::reclamp`].

use serde::Serialize;
use tracing::debug;

use crate::metrics::percentage;

/// The persistent part of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReallocationState {
    processed_count: usize,
}

impl ReallocationState {
    pub fn processed_count(&self) -> usize {
        self.processed_count
    }
}

/// Result of one advance trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvanceOutcome {
    pub before: usize,
    pub after: usize,
    pub requested: u32,
    pub total_risks: usize,
    /// Part of the requested batch that did not fit under the bound.
    pub clamped: usize,
}

impl AdvanceOutcome {
    pub fn advanced_by(&self) -> usize {
        self.after.saturating_sub(self.before)
    }

    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    pub fn is_saturated(&self) -> bool {
        self.after == self.total_risks
    }
}

/// Counter state reported alongside each evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReallocationStatus {
    pub processed_count: usize,
    pub total_risks: usize,
    pub remaining: usize,
    /// `processed_count / total_risks * 100`, `0.0` without risks.
    pub efficiency: f64,
}

impl ReallocationStatus {
    pub fn new(processed_count: usize, total_risks: usize) -> Self {
        Self {
            processed_count,
            total_risks,
            remaining: total_risks.saturating_sub(processed_count),
            efficiency: efficiency(processed_count, total_risks),
        }
    }

    /// The counter sits above the current bound.
    pub fn is_stale(&self) -> bool {
        self.processed_count > self.total_risks
    }
}

pub fn efficiency(processed_count: usize, total_risks: usize) -> f64 {
    percentage(processed_count, total_risks)
}

#[derive(Debug, Clone, Default)]
pub struct BatchReallocator {
    state: ReallocationState,
}

impl BatchReallocator {
    /// A fresh counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReallocationState {
        self.state
    }

    pub fn processed_count(&self) -> usize {
        self.state.processed_count
    }

    /// `processed_count := min(processed_count + batch_size, total_risks)`.
    ///
    /// A saturated counter stays put. A counter left above a shrunken bound
    /// is pulled down to it.
    pub fn advance(&mut self, batch_size: u32, total_risks: usize) -> AdvanceOutcome {
        let before = self.state.processed_count;
        let target = before.saturating_add(batch_size as usize);
        let after = target.min(total_risks);
        self.state.processed_count = after;

        let outcome = AdvanceOutcome {
            before,
            after,
            requested: batch_size,
            total_risks,
            clamped: target - after,
        };
        debug!(
            before,
            after,
            requested = batch_size,
            total_risks,
            clamped = outcome.clamped,
            "advance"
        );
        outcome
    }

    /// Pull the counter down to `total_risks` if it exceeds it.
    /// Returns the amount removed.
    pub fn reclamp(&mut self, total_risks: usize) -> usize {
        let before = self.state.processed_count;
        if before <= total_risks {
            return 0;
        }
        self.state.processed_count = total_risks;
        debug!(before, after = total_risks, "reclamped processed count");
        before - total_risks
    }

    pub fn status(&self, total_risks: usize) -> ReallocationStatus {
        ReallocationStatus::new(self.state.processed_count, total_risks)
    }
}
