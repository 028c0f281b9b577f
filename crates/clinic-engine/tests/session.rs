//! Session triggers, re-clamp policies and session isolation.

use std::sync::Arc;

use clinic_engine::{DashboardSession, SessionStore};
use clinic_model::{
    Appointment, AppointmentStatus, Department, EngineOptions, FilterSpec, ReclampPolicy,
    RecordTable,
};

/// Six high-risk rows: four in Cardiology, two in OPD.
fn table() -> Arc<RecordTable> {
    let departments = [
        Department::Cardiology,
        Department::Cardiology,
        Department::Cardiology,
        Department::Cardiology,
        Department::Opd,
        Department::Opd,
    ];
    let mut records: Vec<Appointment> = departments
        .iter()
        .enumerate()
        .map(|(idx, &dept)| {
            Appointment::new(idx as i64 + 1, 30, dept, 5, AppointmentStatus::NoShow)
                .with_previous_no_shows(3)
        })
        .collect();
    records.push(
        Appointment::new(100, 30, Department::General, 5, AppointmentStatus::Show)
            .with_previous_no_shows(0),
    );
    Arc::new(RecordTable::from_records(records).expect("unique ids"))
}

fn opd_only() -> FilterSpec {
    FilterSpec::new().with_departments([Department::Opd])
}

#[test]
fn new_session_starts_at_zero() {
    let mut session = DashboardSession::new(table(), EngineOptions::default());
    let snapshot = session.snapshot();
    assert_eq!(session.processed_count(), 0);
    assert_eq!(snapshot.reallocation.total_risks, 6);
    assert_eq!(snapshot.metrics.total, 7);
}

#[test]
fn advance_uses_current_view_bound() {
    let mut session = DashboardSession::new(table(), EngineOptions::default());
    let (outcome, snapshot) = session.on_advance_triggered(4);
    assert_eq!((outcome.before, outcome.after), (0, 4));
    assert_eq!(snapshot.reallocation.remaining, 2);

    session.on_filter_changed(opd_only());
    let (outcome, _) = session.on_advance_triggered(1);
    assert_eq!(outcome.total_risks, 2);
    assert_eq!(outcome.after, 2);
}

#[test]
fn preserve_policy_leaves_stale_counter() {
    let mut session = DashboardSession::new(table(), EngineOptions::default());
    session.on_advance_triggered(5);

    let snapshot = session.on_filter_changed(opd_only());
    assert_eq!(session.processed_count(), 5);
    assert_eq!(snapshot.reallocation.total_risks, 2);
    assert_eq!(snapshot.reallocation.efficiency, 250.0);
}

#[test]
fn clamp_on_evaluate_pulls_counter_down() {
    let options = EngineOptions::default().with_reclamp_policy(ReclampPolicy::ClampOnEvaluate);
    let mut session = DashboardSession::new(table(), options);
    session.on_advance_triggered(5);

    let snapshot = session.on_filter_changed(opd_only());
    assert_eq!(session.processed_count(), 2);
    assert_eq!(snapshot.reallocation.efficiency, 100.0);

    // Widening again does not restore the removed progress.
    let snapshot = session.on_filter_changed(FilterSpec::new());
    assert_eq!(snapshot.reallocation.processed_count, 2);
}

#[test]
fn default_batch_comes_from_options() {
    let options = EngineOptions::default().with_batch_size(4);
    let mut session = DashboardSession::new(table(), options);
    let (outcome, _) = session.on_advance_default();
    assert_eq!(outcome.requested, 4);
    assert_eq!(outcome.after, 4);
}

#[test]
fn sessions_do_not_share_counters() {
    let shared = table();
    let mut store = SessionStore::new();
    let first = store.open(Arc::clone(&shared), EngineOptions::default());
    let second = store.open(Arc::clone(&shared), EngineOptions::default());
    assert_ne!(first, second);
    assert_eq!(store.len(), 2);

    store
        .get_mut(&first)
        .expect("first session")
        .on_advance_triggered(3);

    assert_eq!(store.get(&first).map(|s| s.processed_count()), Some(3));
    assert_eq!(store.get(&second).map(|s| s.processed_count()), Some(0));

    assert!(store.close(&first));
    assert!(!store.close(&first));
    assert!(store.get(&first).is_none());
    assert_eq!(store.len(), 1);
}
