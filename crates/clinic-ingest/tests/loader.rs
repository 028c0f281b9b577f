use std::fs;
use std::path::PathBuf;

use clinic_ingest::{IngestError, IngestOptions, read_appointments_csv, read_appointments_csv_with_options};
use clinic_model::{AppointmentStatus, Department, WaitUnit};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn reads_generator_layout() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "healthcare_appointments_large.csv",
        "AppointmentID,Age,Gender,Department,WaitTimeDays,ChronicCondition,SMS_Received,Status\n\
         1000,51,M,OPD,14,0,1,Show\n\
         1001,92,F,Cardiology,3,1,0,No-Show\n\
         1002,14,F,Pediatrics,40,0,0,No-Show\n",
    );

    let table = read_appointments_csv(&path).expect("read csv");
    assert_eq!(table.len(), 3);
    assert_eq!(table.wait_unit(), WaitUnit::Days);

    let columns = table.columns();
    assert!(columns.gender);
    assert!(columns.chronic_condition);
    assert!(columns.sms_received);
    assert!(!columns.previous_no_shows);
    assert!(!columns.insurance);

    let second = &table.records()[1];
    assert_eq!(second.appointment_id, 1001);
    assert_eq!(second.age, 92);
    assert_eq!(second.department, Department::Cardiology);
    assert_eq!(second.status, AppointmentStatus::NoShow);
    assert_eq!(second.chronic_condition, Some(true));
    assert_eq!(second.sms_received, Some(false));
}

#[test]
fn reads_risk_scoring_layout_in_minutes() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "appointments.csv",
        "appointment_id,age,gender,department,wait_time_minutes,status,previous_no_shows,insurance\n\
         1,30,F,General,45,Show,0,Private\n\
         2,65,M,Orthopedics,120,No-Show,2,\n",
    );

    let table = read_appointments_csv(&path).expect("read csv");
    assert_eq!(table.wait_unit(), WaitUnit::Minutes);
    assert!(table.columns().previous_no_shows);
    assert!(table.columns().insurance);
    assert_eq!(table.records()[0].insurance.as_deref(), Some("Private"));
    assert_eq!(table.records()[1].insurance, None);
    assert_eq!(table.records()[1].previous_no_shows, Some(2));
}

#[test]
fn header_only_file_yields_empty_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "empty.csv",
        "AppointmentID,Age,Department,WaitTimeDays,Status\n",
    );
    let table = read_appointments_csv(&path).expect("read csv");
    assert!(table.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_appointments_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::NotFound(_)));
}

#[test]
fn duplicate_ids_fail_unless_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "dupes.csv",
        "AppointmentID,Age,Department,WaitTimeDays,Status\n\
         7,20,OPD,1,Show\n\
         7,21,OPD,2,No-Show\n",
    );

    let err = read_appointments_csv(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::InvalidValue {
            row: 2,
            column: "appointment_id",
            ..
        }
    ));

    let options = IngestOptions::new().with_skip_invalid_rows(true);
    let table = read_appointments_csv_with_options(&path, &options).expect("skip duplicates");
    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].age, 20);
}
