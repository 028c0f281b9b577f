//! Threshold-based risk classification.

use clinic_model::{Appointment, DEFAULT_RISK_THRESHOLD, EngineOptions};
use serde::{Deserialize, Serialize};

use crate::metrics::percentage;
use crate::view::FilteredView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    HighRisk,
    Normal,
}

/// Labels a record high risk when `previous_no_shows >= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskClassifier {
    threshold: u32,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_THRESHOLD)
    }
}

impl RiskClassifier {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn from_options(options: &EngineOptions) -> Self {
        Self::new(options.risk_threshold)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// An empty `previous_no_shows` cell is never high risk.
    pub fn label(&self, record: &Appointment) -> RiskLabel {
        match record.previous_no_shows {
            Some(count) if count >= self.threshold => RiskLabel::HighRisk,
            _ => RiskLabel::Normal,
        }
    }

    pub fn is_high_risk(&self, record: &Appointment) -> bool {
        self.label(record) == RiskLabel::HighRisk
    }

    /// Split `view` into high-risk rows and the rest.
    ///
    /// Returns `None` when the table has no `previous_no_shows` column.
    pub fn partition<'a>(&self, view: &FilteredView<'a>) -> Option<RiskPartition<'a>> {
        if !view.table().columns().previous_no_shows {
            return None;
        }
        Some(RiskPartition {
            threshold: self.threshold,
            high_risk: view.subset(|r| self.is_high_risk(r)),
            normal: view.subset(|r| !self.is_high_risk(r)),
        })
    }
}

/// High-risk rows of a view and their complement, both in view order.
#[derive(Debug, Clone)]
pub struct RiskPartition<'a> {
    threshold: u32,
    high_risk: FilteredView<'a>,
    normal: FilteredView<'a>,
}

impl<'a> RiskPartition<'a> {
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn high_risk(&self) -> &FilteredView<'a> {
        &self.high_risk
    }

    pub fn normal(&self) -> &FilteredView<'a> {
        &self.normal
    }

    pub fn high_risk_count(&self) -> usize {
        self.high_risk.len()
    }

    pub fn normal_count(&self) -> usize {
        self.normal.len()
    }

    pub fn summary(&self) -> RiskSummary {
        let high_risk_count = self.high_risk_count();
        RiskSummary {
            threshold: self.threshold,
            high_risk_count,
            normal_count: self.normal_count(),
            high_risk_rate: percentage(high_risk_count, high_risk_count + self.normal_count()),
        }
    }
}

/// Serializable counts of a [`RiskPartition`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSummary {
    pub threshold: u32,
    pub high_risk_count: usize,
    pub normal_count: usize,
    pub high_risk_rate: f64,
}
