//! Configuration options for the risk engine.

use serde::{Deserialize, Serialize};

/// Default `previous_no_shows` count at which an appointment is high risk.
pub const DEFAULT_RISK_THRESHOLD: u32 = 2;

/// Default number of high-risk slots handled per reallocation trigger.
pub const DEFAULT_BATCH_SIZE: u32 = 25;

/// What happens to the processed counter when the filter changes.
///
/// The high-risk population is recomputed from the current view on every
/// evaluation, so narrowing the filter can leave `processed_count` above the
/// new bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReclampPolicy {
    /// Keep the counter as is; only the next advance clamps it.
    #[default]
    Preserve,
    /// Clamp the counter to the current bound on every evaluation.
    ClampOnEvaluate,
}

/// Options controlling the scoring and reallocation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Records with `previous_no_shows >= risk_threshold` are high risk.
    pub risk_threshold: u32,

    /// Batch size used when a trigger does not name one.
    pub batch_size: u32,

    /// Counter behavior across filter changes.
    pub reclamp_policy: ReclampPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            risk_threshold: DEFAULT_RISK_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
            reclamp_policy: ReclampPolicy::default(),
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risk_threshold(mut self, threshold: u32) -> Self {
        self.risk_threshold = threshold;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_reclamp_policy(mut self, policy: ReclampPolicy) -> Self {
        self.reclamp_policy = policy;
        self
    }
}
