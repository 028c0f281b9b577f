//! Argument parsing and end-to-end runs of the `clinic-risk` binary.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Parser;
use clinic_cli::cli::{Cli, Command as CliCommand, ReclampArg};
use clinic_model::{AppointmentStatus, Department, ReclampPolicy};
use tempfile::TempDir;

const CSV: &str = "\
appointment_id,age,gender,department,wait_time_days,status,previous_no_shows,insurance
1,10,F,Cardiology,4,No-Show,3,Private
2,15,M,Cardiology,2,No-Show,0,Public
3,70,F,OPD,9,No-Show,2,Public
4,85,M,OPD,1,No-Show,1,Private
5,33,F,General,4,Show,5,Private
";

fn write_csv(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("appointments.csv");
    fs::write(&path, CSV).expect("write csv");
    path
}

fn run(args: &[&str], csv: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_clinic-risk"))
        .args(args.iter().map(|&arg| {
            if arg == "{csv}" {
                csv.as_os_str()
            } else {
                OsStr::new(arg)
            }
        }))
        .env_remove("RUST_LOG")
        .output()
        .expect("run clinic-risk")
}

#[test]
fn parses_filter_and_engine_flags() {
    let cli = Cli::try_parse_from([
        "clinic-risk",
        "summary",
        "data.csv",
        "--department",
        "opd,Cardiology",
        "--status",
        "No-Show",
        "--age-min",
        "18",
        "--risk-threshold",
        "3",
        "--reclamp",
        "clamp-on-evaluate",
    ])
    .expect("parse");

    let CliCommand::Summary(args) = cli.command else {
        panic!("expected summary");
    };
    assert_eq!(args.filters.departments, vec![Department::Opd, Department::Cardiology]);
    assert_eq!(args.filters.statuses, vec![AppointmentStatus::NoShow]);
    assert_eq!(args.filters.age_min, Some(18));
    assert_eq!(args.engine.reclamp, ReclampArg::ClampOnEvaluate);

    let options = args.engine.options();
    assert_eq!(options.risk_threshold, 3);
    assert_eq!(options.batch_size, 25);
    assert_eq!(options.reclamp_policy, ReclampPolicy::ClampOnEvaluate);
}

#[test]
fn rejects_unknown_department() {
    let result = Cli::try_parse_from(["clinic-risk", "summary", "data.csv", "--department", "ER"]);
    assert!(result.is_err());
}

#[test]
fn summary_json_reports_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_csv(&dir);
    let output = run(&["summary", "{csv}", "--json", "--department", "Cardiology"], &csv);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(json["total_records"], 5);
    assert_eq!(json["metrics"]["total"], 2);
    assert_eq!(json["risk"]["high_risk_count"], 1);
    assert_eq!(json["heatmap"]["total"], 2);
}

#[test]
fn reallocate_saturates_and_reports_steps() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_csv(&dir);
    let output = run(&["reallocate", "{csv}", "--steps", "2", "--batch-size", "2"], &csv);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    step 1: 0 -> 2 of 3 (requested 2)
    step 2: 2 -> 3 of 3 (requested 2), clamped 1
    processed 3 of 3 (100.0%)
    ");
}

#[test]
fn export_writes_filtered_rows() {
    let dir = TempDir::new().expect("temp dir");
    let csv = write_csv(&dir);
    let out = dir.path().join("export.csv");
    let output = run(
        &["export", "{csv}", "--status", "Show", "--output", out.to_str().expect("utf8 path")],
        &csv,
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(&out).expect("read export");
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("appointment_id,age,gender,department,wait_time_days,status,previous_no_shows,insurance")
    );
    assert_eq!(lines.next(), Some("5,33,F,General,4,Show,5,Private"));
    assert_eq!(lines.next(), None);
}

#[test]
fn missing_file_exits_non_zero() {
    let dir = TempDir::new().expect("temp dir");
    let absent = dir.path().join("absent.csv");
    let output = run(&["summary", "{csv}"], &absent);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}
