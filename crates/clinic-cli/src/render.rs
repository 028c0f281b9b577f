//! Plain-text formatting of dashboard values.
//!
//! Table layout lives in the binary; these helpers produce the strings that
//! go into the cells, plus line-oriented renderings used for piping.

use clinic_engine::{
    AdvanceOutcome, Heatmap, Metrics, ReallocationStatus, RiskSummary, format_percent,
};
use clinic_model::{AgeBin, Appointment};

pub fn metric_rows(metrics: &Metrics) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Total appointments", metrics.total.to_string()),
        ("No-shows", metrics.no_show_count.to_string()),
        ("No-show rate", format_percent(metrics.no_show_rate)),
        (
            "Average wait",
            format!("{:.1} {}", metrics.avg_wait_time, metrics.wait_unit),
        ),
    ];
    if let Some(rate) = metrics.sms_reminder_rate {
        rows.push(("SMS reminder rate", format_percent(rate)));
    }
    if let Some(rate) = metrics.chronic_condition_rate {
        rows.push(("Chronic condition rate", format_percent(rate)));
    }
    rows
}

pub fn risk_rows(
    risk: Option<&RiskSummary>,
    status: &ReallocationStatus,
) -> Vec<(&'static str, String)> {
    let Some(risk) = risk else {
        return vec![("Risk scoring", "inactive (no previous_no_shows column)".to_string())];
    };
    vec![
        ("Risk threshold", format!(">= {}", risk.threshold)),
        ("High-risk appointments", risk.high_risk_count.to_string()),
        ("High-risk rate", format_percent(risk.high_risk_rate)),
        ("Reallocated", status.processed_count.to_string()),
        ("Remaining", status.remaining.to_string()),
        ("Efficiency", format_percent(status.efficiency)),
    ]
}

/// `department,age_bin,count` lines for non-zero cells, header first.
pub fn heatmap_csv(heatmap: &Heatmap) -> String {
    let mut lines = vec!["department,age_bin,count".to_string()];
    lines.extend(
        heatmap
            .iter()
            .map(|cell| format!("{},{},{}", cell.department, cell.age_bin, cell.count)),
    );
    lines.join("\n")
}

pub fn heatmap_header() -> Vec<String> {
    let mut header = vec!["Department".to_string()];
    header.extend(AgeBin::ALL.iter().map(|bin| bin.label().to_string()));
    header
}

pub fn describe_advance(step: usize, outcome: &AdvanceOutcome) -> String {
    let mut line = format!(
        "step {step}: {} -> {} of {} (requested {})",
        outcome.before, outcome.after, outcome.total_risks, outcome.requested
    );
    if outcome.clamped > 0 {
        line.push_str(&format!(", clamped {}", outcome.clamped));
    }
    line
}

pub fn describe_status(status: &ReallocationStatus) -> String {
    let mut line = format!(
        "processed {} of {} ({})",
        status.processed_count,
        status.total_risks,
        format_percent(status.efficiency)
    );
    if status.is_stale() {
        line.push_str(", above current high-risk count");
    }
    line
}

/// Cells of one preview row; blank for absent optional values.
pub fn preview_row(record: &Appointment) -> Vec<String> {
    let optional = |value: Option<String>| value.unwrap_or_default();
    vec![
        record.appointment_id.to_string(),
        record.age.to_string(),
        optional(record.gender.clone()),
        record.department.to_string(),
        record.wait_time.to_string(),
        record.status.to_string(),
        optional(record.previous_no_shows.map(|v| v.to_string())),
        optional(record.insurance.clone()),
    ]
}

pub const PREVIEW_HEADER: [&str; 8] = [
    "ID",
    "Age",
    "Gender",
    "Department",
    "Wait",
    "Status",
    "Prev no-shows",
    "Insurance",
];
