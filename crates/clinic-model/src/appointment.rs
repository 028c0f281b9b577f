use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::enums::{AppointmentStatus, Department, WaitUnit};
use crate::error::{ModelError, Result};

/// One row of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub age: u32,
    pub gender: Option<String>,
    pub department: Department,
    /// Wait time in the unit carried by the owning [`RecordTable`].
    pub wait_time: u32,
    pub status: AppointmentStatus,
    /// Count of earlier missed appointments; only risk-scoring datasets carry it.
    pub previous_no_shows: Option<u32>,
    pub insurance: Option<String>,
    pub chronic_condition: Option<bool>,
    pub sms_received: Option<bool>,
}

impl Appointment {
    /// Create a record with the required fields; optional fields start empty.
    pub fn new(
        appointment_id: i64,
        age: u32,
        department: Department,
        wait_time: u32,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            appointment_id,
            age,
            gender: None,
            department,
            wait_time,
            status,
            previous_no_shows: None,
            insurance: None,
            chronic_condition: None,
            sms_received: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_insurance(mut self, insurance: impl Into<String>) -> Self {
        self.insurance = Some(insurance.into());
        self
    }

    pub fn with_previous_no_shows(mut self, count: u32) -> Self {
        self.previous_no_shows = Some(count);
        self
    }

    pub fn with_chronic_condition(mut self, flag: bool) -> Self {
        self.chronic_condition = Some(flag);
        self
    }

    pub fn with_sms_received(mut self, flag: bool) -> Self {
        self.sms_received = Some(flag);
        self
    }

    pub fn is_no_show(&self) -> bool {
        self.status.is_no_show()
    }
}

/// Which optional columns the source table carried.
///
/// A column that is absent disables the component depending on it rather
/// than failing the load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPresence {
    pub gender: bool,
    pub insurance: bool,
    pub previous_no_shows: bool,
    pub chronic_condition: bool,
    pub sms_received: bool,
}

impl ColumnPresence {
    /// Every optional column present.
    pub fn all() -> Self {
        Self {
            gender: true,
            insurance: true,
            previous_no_shows: true,
            chronic_condition: true,
            sms_received: true,
        }
    }

    /// Derive presence from the records themselves: a column counts as
    /// present when at least one record carries a value for it.
    pub fn infer(records: &[Appointment]) -> Self {
        Self {
            gender: records.iter().any(|r| r.gender.is_some()),
            insurance: records.iter().any(|r| r.insurance.is_some()),
            previous_no_shows: records.iter().any(|r| r.previous_no_shows.is_some()),
            chronic_condition: records.iter().any(|r| r.chronic_condition.is_some()),
            sms_received: records.iter().any(|r| r.sms_received.is_some()),
        }
    }

    /// Names of the optional columns that are missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.gender {
            missing.push("gender");
        }
        if !self.insurance {
            missing.push("insurance");
        }
        if !self.previous_no_shows {
            missing.push("previous_no_shows");
        }
        if !self.chronic_condition {
            missing.push("chronic_condition");
        }
        if !self.sms_received {
            missing.push("sms_received");
        }
        missing
    }
}

/// The full, unfiltered set of appointment rows for a session.
///
/// Immutable once built; the engine only derives views from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordTable {
    records: Vec<Appointment>,
    columns: ColumnPresence,
    wait_unit: WaitUnit,
}

impl RecordTable {
    /// Build a table, rejecting duplicate appointment ids.
    pub fn new(
        records: Vec<Appointment>,
        columns: ColumnPresence,
        wait_unit: WaitUnit,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.appointment_id) {
                return Err(ModelError::DuplicateAppointmentId(record.appointment_id));
            }
        }
        Ok(Self {
            records,
            columns,
            wait_unit,
        })
    }

    /// Build a table whose column presence is inferred from the records.
    pub fn from_records(records: Vec<Appointment>) -> Result<Self> {
        let columns = ColumnPresence::infer(&records);
        Self::new(records, columns, WaitUnit::Days)
    }

    pub fn records(&self) -> &[Appointment] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Appointment> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> ColumnPresence {
        self.columns
    }

    pub fn wait_unit(&self) -> WaitUnit {
        self.wait_unit
    }

    /// Departments that occur in the table.
    pub fn departments(&self) -> BTreeSet<Department> {
        self.records.iter().map(|r| r.department).collect()
    }

    /// Distinct non-empty gender values.
    pub fn genders(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.gender.clone())
            .collect()
    }

    /// Distinct non-empty insurance values.
    pub fn insurance_types(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.insurance.clone())
            .collect()
    }

    /// Observed `(min, max)` age, `None` for an empty table.
    pub fn age_range(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.age).min()?;
        let max = self.records.iter().map(|r| r.age).max()?;
        Some((min, max))
    }

    /// Observed `(min, max)` wait time, `None` for an empty table.
    pub fn wait_time_range(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.wait_time).min()?;
        let max = self.records.iter().map(|r| r.wait_time).max()?;
        Some((min, max))
    }
}
