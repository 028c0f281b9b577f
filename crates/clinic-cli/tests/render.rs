//! Snapshot tests for the text renderings.

use clinic_cli::render::{describe_advance, describe_status, heatmap_csv, metric_rows, risk_rows};
use clinic_engine::{BatchReallocator, FilteredView, Heatmap, evaluate};
use clinic_model::{
    Appointment, AppointmentStatus, Department, EngineOptions, FilterSpec, RecordTable,
};

fn table() -> RecordTable {
    RecordTable::from_records(vec![
        Appointment::new(1, 10, Department::Cardiology, 4, AppointmentStatus::NoShow)
            .with_previous_no_shows(3)
            .with_sms_received(true),
        Appointment::new(2, 15, Department::Cardiology, 2, AppointmentStatus::NoShow)
            .with_previous_no_shows(0)
            .with_sms_received(false),
        Appointment::new(3, 70, Department::Opd, 9, AppointmentStatus::NoShow)
            .with_previous_no_shows(2)
            .with_sms_received(true),
        Appointment::new(4, 85, Department::Opd, 1, AppointmentStatus::NoShow)
            .with_previous_no_shows(1)
            .with_sms_received(false),
        Appointment::new(5, 33, Department::General, 4, AppointmentStatus::Show)
            .with_previous_no_shows(5)
            .with_sms_received(false),
    ])
    .expect("unique ids")
}

fn rows_text(rows: Vec<(&'static str, String)>) -> String {
    rows.into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn heatmap_lines() {
    let table = table();
    let heatmap = Heatmap::no_shows(&FilteredView::all(&table));
    insta::assert_snapshot!(heatmap_csv(&heatmap), @r"
    department,age_bin,count
    Cardiology,0-20,2
    OPD,60-80,1
    OPD,80-100,1
    ");
}

#[test]
fn metric_lines() {
    let table = table();
    let evaluation = evaluate(&table, &FilterSpec::new(), &EngineOptions::default());
    insta::assert_snapshot!(rows_text(metric_rows(&evaluation.metrics)), @r"
    Total appointments: 5
    No-shows: 4
    No-show rate: 80.0%
    Average wait: 4.0 days
    SMS reminder rate: 40.0%
    ");
}

#[test]
fn risk_lines_after_one_batch() {
    let table = table();
    let evaluation = evaluate(&table, &FilterSpec::new(), &EngineOptions::default());
    let mut reallocator = BatchReallocator::new();
    let outcome = reallocator.advance(2, evaluation.total_risks());
    let snapshot = evaluation.snapshot(&reallocator);

    assert_eq!(describe_advance(1, &outcome), "step 1: 0 -> 2 of 3 (requested 2)");
    insta::assert_snapshot!(
        rows_text(risk_rows(snapshot.risk.as_ref(), &snapshot.reallocation)),
        @r"
    Risk threshold: >= 2
    High-risk appointments: 3
    High-risk rate: 60.0%
    Reallocated: 2
    Remaining: 1
    Efficiency: 66.7%
    "
    );
}

#[test]
fn clamped_and_stale_descriptions() {
    let mut reallocator = BatchReallocator::new();
    let outcome = reallocator.advance(25, 3);
    assert_eq!(
        describe_advance(2, &outcome),
        "step 2: 0 -> 3 of 3 (requested 25), clamped 22"
    );
    assert_eq!(
        describe_status(&reallocator.status(1)),
        "processed 3 of 1 (300.0%), above current high-risk count"
    );
}

#[test]
fn inactive_risk_is_reported() {
    let table = RecordTable::from_records(vec![Appointment::new(
        1,
        40,
        Department::General,
        3,
        AppointmentStatus::Show,
    )])
    .expect("unique ids");
    let evaluation = evaluate(&table, &FilterSpec::new(), &EngineOptions::default());
    let snapshot = evaluation.snapshot(&BatchReallocator::new());
    assert_eq!(
        rows_text(risk_rows(snapshot.risk.as_ref(), &snapshot.reallocation)),
        "Risk scoring: inactive (no previous_no_shows column)"
    );
}
