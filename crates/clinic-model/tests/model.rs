//! Tests for clinic-model types.

use clinic_model::{
    AgeBin, Appointment, AppointmentStatus, ColumnPresence, Department, FilterSpec, Interval,
    RecordTable, WaitUnit,
};

fn sample_table() -> RecordTable {
    let records = vec![
        Appointment::new(1000, 12, Department::Pediatrics, 3, AppointmentStatus::Show)
            .with_gender("F")
            .with_previous_no_shows(0),
        Appointment::new(1001, 67, Department::Cardiology, 21, AppointmentStatus::NoShow)
            .with_gender("M")
            .with_previous_no_shows(2),
        Appointment::new(1002, 45, Department::Opd, 8, AppointmentStatus::Show)
            .with_gender("M")
            .with_previous_no_shows(1),
    ];
    RecordTable::from_records(records).expect("unique ids")
}

#[test]
fn infers_column_presence() {
    let table = sample_table();
    let columns = table.columns();
    assert!(columns.gender);
    assert!(columns.previous_no_shows);
    assert!(!columns.insurance);
    assert_eq!(
        columns.missing(),
        vec!["insurance", "chronic_condition", "sms_received"]
    );
}

#[test]
fn full_domain_covers_observed_values() {
    let table = sample_table();
    let spec = FilterSpec::full_domain(&table);

    let departments = spec.departments.expect("departments constrained");
    assert_eq!(departments.len(), 3);
    assert!(departments.contains(&Department::Opd));

    let genders = spec.genders.expect("genders constrained");
    assert_eq!(genders.into_iter().collect::<Vec<_>>(), vec!["F", "M"]);

    // Insurance column is absent so it must stay unconstrained.
    assert!(spec.insurance.is_none());
    assert_eq!(spec.age, Some(Interval::new(12, 67).unwrap()));
    assert_eq!(spec.wait_time, Some(Interval::new(3, 21).unwrap()));
}

#[test]
fn full_domain_leaves_partially_blank_fields_open() {
    let records = vec![
        Appointment::new(1, 30, Department::General, 1, AppointmentStatus::Show)
            .with_insurance("Private"),
        Appointment::new(2, 31, Department::General, 1, AppointmentStatus::Show),
    ];
    let table = RecordTable::from_records(records).expect("unique ids");
    assert!(table.columns().insurance);
    assert!(FilterSpec::full_domain(&table).insurance.is_none());
}

#[test]
fn full_domain_of_empty_table_has_no_intervals() {
    let table = RecordTable::new(Vec::new(), ColumnPresence::all(), WaitUnit::Minutes)
        .expect("empty table");
    let spec = FilterSpec::full_domain(&table);
    assert!(spec.age.is_none());
    assert!(spec.wait_time.is_none());
    assert_eq!(spec.departments.map(|d| d.len()), Some(0));
    assert_eq!(table.wait_unit(), WaitUnit::Minutes);
}

#[test]
fn serializes_labels_as_in_source_data() {
    let json = serde_json::to_string(&AppointmentStatus::NoShow).expect("serialize status");
    assert_eq!(json, "\"No-Show\"");
    let json = serde_json::to_string(&Department::Opd).expect("serialize department");
    assert_eq!(json, "\"OPD\"");
    let json = serde_json::to_string(&AgeBin::From80To100).expect("serialize bin");
    assert_eq!(json, "\"80-100\"");
}

#[test]
fn departments_are_listed_in_display_order() {
    let labels: Vec<&str> = Department::ALL.iter().map(Department::as_str).collect();
    assert_eq!(
        labels,
        vec!["Cardiology", "Pediatrics", "OPD", "Orthopedics", "General"]
    );
}
