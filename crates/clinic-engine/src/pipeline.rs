//! Filter, measure, classify and aggregate in one pass.

use std::time::Instant;

use clinic_model::{EngineOptions, FilterSpec, RecordTable};
use serde::Serialize;
use tracing::{debug, info, info_span};

use crate::filter::apply_filter;
use crate::heatmap::Heatmap;
use crate::metrics::{DepartmentCount, Metrics, compute_metrics, department_counts};
use crate::reallocation::{BatchReallocator, ReallocationStatus};
use crate::risk::{RiskClassifier, RiskPartition, RiskSummary};
use crate::view::FilteredView;

/// Everything derived from one table and one filter.
///
/// Borrows the table; nothing here carries state across evaluations.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    pub view: FilteredView<'a>,
    pub metrics: Metrics,
    pub department_counts: Vec<DepartmentCount>,
    pub risk: Option<RiskPartition<'a>>,
    pub heatmap: Heatmap,
}

impl Evaluation<'_> {
    /// Bound for the reallocation counter; zero when risk scoring is inactive.
    pub fn total_risks(&self) -> usize {
        self.risk
            .as_ref()
            .map_or(0, RiskPartition::high_risk_count)
    }

    pub fn snapshot(&self, reallocator: &BatchReallocator) -> DashboardSnapshot {
        DashboardSnapshot {
            total_records: self.view.table().len(),
            metrics: self.metrics,
            department_counts: self.department_counts.clone(),
            risk: self.risk.as_ref().map(RiskPartition::summary),
            heatmap: self.heatmap.clone(),
            reallocation: reallocator.status(self.total_risks()),
        }
    }
}

/// Serializable output of one evaluation plus the counter status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Rows in the unfiltered table.
    pub total_records: usize,
    pub metrics: Metrics,
    pub department_counts: Vec<DepartmentCount>,
    /// `None` when the table has no `previous_no_shows` column.
    pub risk: Option<RiskSummary>,
    pub heatmap: Heatmap,
    pub reallocation: ReallocationStatus,
}

pub fn evaluate<'a>(
    table: &'a RecordTable,
    spec: &FilterSpec,
    options: &EngineOptions,
) -> Evaluation<'a> {
    let span = info_span!("evaluate", rows = table.len());
    let _guard = span.enter();
    let start = Instant::now();

    let view = apply_filter(table, spec);
    let metrics = compute_metrics(&view);
    let department_counts = department_counts(&view);
    let risk = RiskClassifier::from_options(options).partition(&view);
    if risk.is_none() {
        debug!("previous_no_shows column absent; risk scoring inactive");
    }
    let heatmap = Heatmap::no_shows(&view);

    info!(
        filtered = view.len(),
        no_shows = metrics.no_show_count,
        high_risk = risk.as_ref().map(RiskPartition::high_risk_count),
        heatmap_cells = heatmap.len(),
        duration_ms = start.elapsed().as_millis(),
        "evaluation complete"
    );

    Evaluation {
        view,
        metrics,
        department_counts,
        risk,
        heatmap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_model::{Appointment, AppointmentStatus, Department};

    #[test]
    fn inactive_classifier_means_zero_risks() {
        let table = RecordTable::from_records(vec![Appointment::new(
            1,
            30,
            Department::Opd,
            2,
            AppointmentStatus::NoShow,
        )])
        .unwrap();
        let evaluation = evaluate(&table, &FilterSpec::new(), &EngineOptions::default());
        assert_eq!(evaluation.total_risks(), 0);

        let snapshot = evaluation.snapshot(&BatchReallocator::new());
        assert!(snapshot.risk.is_none());
        assert_eq!(snapshot.reallocation.efficiency, 0.0);
        assert_eq!(snapshot.heatmap.total(), 1);
    }
}
