//! Column names and header resolution.
//!
//! Dataset variants spell headers differently (`AppointmentID`,
//! `appointment_id`, `WaitTimeDays`, `wait_time_minutes`, ...). Headers are
//! compared on a compact key: lowercase ASCII alphanumerics only.

use clinic_model::WaitUnit;

/// Canonical column names, used when materializing frames.
pub mod names {
    pub const APPOINTMENT_ID: &str = "appointment_id";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const DEPARTMENT: &str = "department";
    pub const WAIT_TIME_DAYS: &str = "wait_time_days";
    pub const WAIT_TIME_MINUTES: &str = "wait_time_minutes";
    pub const STATUS: &str = "status";
    pub const PREVIOUS_NO_SHOWS: &str = "previous_no_shows";
    pub const INSURANCE: &str = "insurance";
    pub const CHRONIC_CONDITION: &str = "chronic_condition";
    pub const SMS_RECEIVED: &str = "sms_received";
}

/// What a source column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    AppointmentId,
    Age,
    Gender,
    Department,
    WaitTime(WaitUnit),
    Status,
    PreviousNoShows,
    Insurance,
    ChronicCondition,
    SmsReceived,
}

/// Lowercase, alphanumeric-only key used for header matching.
pub fn compact_key(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Maps a raw header to its role, if recognized.
pub fn role_for_header(header: &str) -> Option<ColumnRole> {
    let role = match compact_key(header).as_str() {
        "appointmentid" | "apptid" | "id" => ColumnRole::AppointmentId,
        "age" | "patientage" => ColumnRole::Age,
        "gender" | "sex" => ColumnRole::Gender,
        "department" | "dept" => ColumnRole::Department,
        "waittimedays" | "waitdays" | "waittime" => ColumnRole::WaitTime(WaitUnit::Days),
        "waittimeminutes" | "waittimemins" | "waitminutes" => {
            ColumnRole::WaitTime(WaitUnit::Minutes)
        }
        "status" | "appointmentstatus" | "attendance" => ColumnRole::Status,
        "previousnoshows" | "prevnoshows" | "priornoshows" => ColumnRole::PreviousNoShows,
        "insurance" | "insurancetype" | "insuranceprovider" => ColumnRole::Insurance,
        "chroniccondition" | "chronic" => ColumnRole::ChronicCondition,
        "smsreceived" | "sms" | "smsreminder" => ColumnRole::SmsReceived,
        _ => return None,
    };
    Some(role)
}

/// Source header chosen for each role. The first matching header wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub appointment_id: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub department: Option<String>,
    pub wait_time: Option<(String, WaitUnit)>,
    pub status: Option<String>,
    pub previous_no_shows: Option<String>,
    pub insurance: Option<String>,
    pub chronic_condition: Option<String>,
    pub sms_received: Option<String>,
}

impl ColumnMap {
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = Self::default();
        for header in headers {
            let Some(role) = role_for_header(header) else {
                continue;
            };
            let name = header.to_string();
            let slot = match role {
                ColumnRole::AppointmentId => &mut map.appointment_id,
                ColumnRole::Age => &mut map.age,
                ColumnRole::Gender => &mut map.gender,
                ColumnRole::Department => &mut map.department,
                ColumnRole::WaitTime(unit) => {
                    if map.wait_time.is_none() {
                        map.wait_time = Some((name, unit));
                    }
                    continue;
                }
                ColumnRole::Status => &mut map.status,
                ColumnRole::PreviousNoShows => &mut map.previous_no_shows,
                ColumnRole::Insurance => &mut map.insurance,
                ColumnRole::ChronicCondition => &mut map.chronic_condition,
                ColumnRole::SmsReceived => &mut map.sms_received,
            };
            if slot.is_none() {
                *slot = Some(name);
            }
        }
        map
    }

    /// Canonical names of required columns that were not found.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.appointment_id.is_none() {
            missing.push(names::APPOINTMENT_ID);
        }
        if self.age.is_none() {
            missing.push(names::AGE);
        }
        if self.department.is_none() {
            missing.push(names::DEPARTMENT);
        }
        if self.wait_time.is_none() {
            missing.push(names::WAIT_TIME_DAYS);
        }
        if self.status.is_none() {
            missing.push(names::STATUS);
        }
        missing
    }
}
