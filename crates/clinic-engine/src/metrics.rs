//! Scalar summary statistics over a filtered view.

use clinic_model::{Appointment, Department, WaitUnit};
use serde::Serialize;

use crate::view::FilteredView;

/// Summary statistics for one view.
///
/// Values are kept at full precision; use [`round_one_decimal`] or
/// [`format_percent`] when presenting them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub no_show_count: usize,
    /// Percentage in `[0, 100]`.
    pub no_show_rate: f64,
    pub avg_wait_time: f64,
    pub wait_unit: WaitUnit,
    /// `None` when the source had no SMS column.
    pub sms_reminder_rate: Option<f64>,
    /// `None` when the source had no chronic-condition column.
    pub chronic_condition_rate: Option<f64>,
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Render a percentage with one decimal, e.g. `42.9%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

fn flag_rate<F>(view: &FilteredView<'_>, present: bool, flag: F) -> Option<f64>
where
    F: Fn(&Appointment) -> Option<bool>,
{
    if !present {
        return None;
    }
    let set = view.records().filter(|r| flag(r) == Some(true)).count();
    Some(percentage(set, view.len()))
}

pub fn compute_metrics(view: &FilteredView<'_>) -> Metrics {
    let table = view.table();
    let total = view.len();
    let no_show_count = view.records().filter(|r| r.is_no_show()).count();
    let wait_sum: u64 = view.records().map(|r| u64::from(r.wait_time)).sum();
    let avg_wait_time = if total == 0 {
        0.0
    } else {
        wait_sum as f64 / total as f64
    };
    let columns = table.columns();

    Metrics {
        total,
        no_show_count,
        no_show_rate: percentage(no_show_count, total),
        avg_wait_time,
        wait_unit: table.wait_unit(),
        sms_reminder_rate: flag_rate(view, columns.sms_received, |r| r.sms_received),
        chronic_condition_rate: flag_rate(view, columns.chronic_condition, |r| {
            r.chronic_condition
        }),
    }
}

/// Appointments per department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: Department,
    pub count: usize,
}

/// Counts for every department in [`Department::ALL`] order, zeros included.
pub fn department_counts(view: &FilteredView<'_>) -> Vec<DepartmentCount> {
    let mut counts = [0usize; Department::ALL.len()];
    for record in view.records() {
        if let Some(slot) = Department::ALL.iter().position(|d| *d == record.department) {
            counts[slot] += 1;
        }
    }
    Department::ALL
        .iter()
        .zip(counts)
        .map(|(department, count)| DepartmentCount {
            department: *department,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_model::{AppointmentStatus, RecordTable};

    #[test]
    fn rates_use_full_precision() {
        let table = RecordTable::from_records(vec![
            Appointment::new(1, 30, Department::Opd, 1, AppointmentStatus::NoShow),
            Appointment::new(2, 30, Department::Opd, 2, AppointmentStatus::Show),
            Appointment::new(3, 30, Department::Opd, 4, AppointmentStatus::Show),
        ])
        .unwrap();
        let metrics = compute_metrics(&FilteredView::all(&table));
        assert_eq!(metrics.no_show_count, 1);
        assert!((metrics.no_show_rate - 100.0 / 3.0).abs() < 1e-9);
        assert!((metrics.avg_wait_time - 7.0 / 3.0).abs() < 1e-9);
        assert_eq!(round_one_decimal(metrics.no_show_rate), 33.3);
        assert_eq!(format_percent(metrics.no_show_rate), "33.3%");
    }

    #[test]
    fn flag_rates_are_none_without_column() {
        let table = RecordTable::from_records(vec![Appointment::new(
            1,
            30,
            Department::General,
            1,
            AppointmentStatus::Show,
        )])
        .unwrap();
        let metrics = compute_metrics(&FilteredView::all(&table));
        assert_eq!(metrics.sms_reminder_rate, None);
        assert_eq!(metrics.chronic_condition_rate, None);
    }

    #[test]
    fn sms_rate_counts_flagged_rows() {
        let table = RecordTable::from_records(vec![
            Appointment::new(1, 30, Department::General, 1, AppointmentStatus::Show)
                .with_sms_received(true),
            Appointment::new(2, 30, Department::General, 1, AppointmentStatus::Show)
                .with_sms_received(false),
        ])
        .unwrap();
        let metrics = compute_metrics(&FilteredView::all(&table));
        assert_eq!(metrics.sms_reminder_rate, Some(50.0));
    }

    #[test]
    fn department_counts_include_zeros_in_fixed_order() {
        let table = RecordTable::from_records(vec![
            Appointment::new(1, 30, Department::General, 1, AppointmentStatus::Show),
            Appointment::new(2, 30, Department::Cardiology, 1, AppointmentStatus::Show),
            Appointment::new(3, 30, Department::General, 1, AppointmentStatus::Show),
        ])
        .unwrap();
        let counts = department_counts(&FilteredView::all(&table));
        let flat: Vec<_> = counts.iter().map(|c| (c.department, c.count)).collect();
        assert_eq!(
            flat,
            vec![
                (Department::Cardiology, 1),
                (Department::Pediatrics, 0),
                (Department::Opd, 0),
                (Department::Orthopedics, 0),
                (Department::General, 2),
            ]
        );
    }
}
