//! CSV loading into a [`RecordTable`].
//!
//! The file is read with polars as all-text columns, headers are resolved
//! through [`ColumnMap`], and each row is validated against the record
//! contract (age in `0..=100`, known department and status, non-negative
//! counts). Optional columns that are absent are recorded in
//! [`ColumnPresence`] instead of failing the load.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

use clinic_model::{
    Appointment, AppointmentStatus, ColumnPresence, Department, MAX_BINNED_AGE, RecordTable,
    WaitUnit,
};

use crate::columns::{ColumnMap, names};
use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_string, parse_flag, parse_whole};

/// Options for CSV ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Skip rows that violate the record contract instead of failing.
    /// Skipped rows are logged at warn level.
    pub skip_invalid_rows: bool,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }
}

/// Read a CSV file with every column as text.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.to_path_buf()));
    }
    if std::fs::metadata(path)?.len() == 0 {
        return Err(IngestError::EmptyFile(path.to_path_buf()));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Load an appointment CSV with default options.
pub fn read_appointments_csv(path: &Path) -> Result<RecordTable> {
    read_appointments_csv_with_options(path, &IngestOptions::default())
}

pub fn read_appointments_csv_with_options(
    path: &Path,
    options: &IngestOptions,
) -> Result<RecordTable> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let df = read_csv_frame(path)?;
    let table = table_from_frame(&df, options)?;

    info!(
        rows = table.len(),
        source_rows = df.height(),
        wait_unit = %table.wait_unit(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

/// Source columns resolved to series, one slot per role.
struct SourceColumns<'a> {
    appointment_id: &'a Series,
    age: &'a Series,
    department: &'a Series,
    wait_time: &'a Series,
    status: &'a Series,
    gender: Option<&'a Series>,
    previous_no_shows: Option<&'a Series>,
    insurance: Option<&'a Series>,
    chronic_condition: Option<&'a Series>,
    sms_received: Option<&'a Series>,
}

fn required<'a>(df: &'a DataFrame, name: Option<&str>, canonical: &'static str) -> Result<&'a Series> {
    let name = name.ok_or(IngestError::MissingColumn(canonical))?;
    Ok(df.column(name)?.as_materialized_series())
}

fn optional<'a>(df: &'a DataFrame, name: Option<&str>) -> Result<Option<&'a Series>> {
    match name {
        Some(name) => Ok(Some(df.column(name)?.as_materialized_series())),
        None => Ok(None),
    }
}

/// Convert a loaded frame into a validated [`RecordTable`].
pub fn table_from_frame(df: &DataFrame, options: &IngestOptions) -> Result<RecordTable> {
    let map = ColumnMap::resolve(df.get_column_names_str());
    if let Some(missing) = map.missing_required().first() {
        return Err(IngestError::MissingColumn(*missing));
    }
    let wait_unit = map
        .wait_time
        .as_ref()
        .map(|(_, unit)| *unit)
        .unwrap_or_default();

    let source = SourceColumns {
        appointment_id: required(df, map.appointment_id.as_deref(), names::APPOINTMENT_ID)?,
        age: required(df, map.age.as_deref(), names::AGE)?,
        department: required(df, map.department.as_deref(), names::DEPARTMENT)?,
        wait_time: required(
            df,
            map.wait_time.as_ref().map(|(name, _)| name.as_str()),
            names::WAIT_TIME_DAYS,
        )?,
        status: required(df, map.status.as_deref(), names::STATUS)?,
        gender: optional(df, map.gender.as_deref())?,
        previous_no_shows: optional(df, map.previous_no_shows.as_deref())?,
        insurance: optional(df, map.insurance.as_deref())?,
        chronic_condition: optional(df, map.chronic_condition.as_deref())?,
        sms_received: optional(df, map.sms_received.as_deref())?,
    };

    let columns = ColumnPresence {
        gender: source.gender.is_some(),
        insurance: source.insurance.is_some(),
        previous_no_shows: source.previous_no_shows.is_some(),
        chronic_condition: source.chronic_condition.is_some(),
        sms_received: source.sms_received.is_some(),
    };
    for missing in columns.missing() {
        debug!(column = missing, "optional column absent; dependent features disabled");
    }

    let mut records = Vec::with_capacity(df.height());
    let mut seen_ids = HashSet::with_capacity(df.height());
    let mut skipped = 0usize;
    for idx in 0..df.height() {
        let row_number = idx + 1;
        let parsed = read_row(&source, idx, row_number).and_then(|record| {
            if seen_ids.insert(record.appointment_id) {
                Ok(record)
            } else {
                Err(IngestError::InvalidValue {
                    row: row_number,
                    column: names::APPOINTMENT_ID,
                    value: record.appointment_id.to_string(),
                    reason: "duplicate appointment id".to_string(),
                })
            }
        });
        match parsed {
            Ok(record) => records.push(record),
            Err(error @ IngestError::InvalidValue { .. }) if options.skip_invalid_rows => {
                warn!(%error, "skipping invalid row");
                skipped += 1;
            }
            Err(error) => return Err(error),
        }
    }
    if skipped > 0 {
        warn!(skipped, "rows skipped during ingest");
    }

    Ok(RecordTable::new(records, columns, wait_unit)?)
}

fn cell(series: &Series, idx: usize) -> Result<String> {
    Ok(any_to_string(series.get(idx)?))
}

fn invalid(row: usize, column: &'static str, value: &str, reason: &str) -> IngestError {
    IngestError::InvalidValue {
        row,
        column,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_non_negative(row: usize, column: &'static str, value: &str) -> Result<u32> {
    let parsed = parse_whole(value).ok_or_else(|| invalid(row, column, value, "not a whole number"))?;
    u32::try_from(parsed).map_err(|_| invalid(row, column, value, "must be non-negative"))
}

fn read_row(source: &SourceColumns<'_>, idx: usize, row: usize) -> Result<Appointment> {
    let id_text = cell(source.appointment_id, idx)?;
    let appointment_id = parse_whole(&id_text)
        .ok_or_else(|| invalid(row, names::APPOINTMENT_ID, &id_text, "not a whole number"))?;

    let age_text = cell(source.age, idx)?;
    let age = parse_non_negative(row, names::AGE, &age_text)?;
    if age > MAX_BINNED_AGE {
        return Err(invalid(row, names::AGE, &age_text, "age above 100"));
    }

    let department_text = cell(source.department, idx)?;
    let department: Department = department_text
        .parse()
        .map_err(|_| invalid(row, names::DEPARTMENT, &department_text, "unknown department"))?;

    let wait_text = cell(source.wait_time, idx)?;
    let wait_time = parse_non_negative(row, names::WAIT_TIME_DAYS, &wait_text)?;

    let status_text = cell(source.status, idx)?;
    let status: AppointmentStatus = status_text
        .parse()
        .map_err(|_| invalid(row, names::STATUS, &status_text, "expected Show or No-Show"))?;

    let mut record = Appointment::new(appointment_id, age, department, wait_time, status);

    if let Some(series) = source.gender {
        record.gender = non_empty(cell(series, idx)?);
    }
    if let Some(series) = source.insurance {
        record.insurance = non_empty(cell(series, idx)?);
    }
    if let Some(series) = source.previous_no_shows {
        let text = cell(series, idx)?;
        if !text.is_empty() {
            record.previous_no_shows = Some(parse_non_negative(row, names::PREVIOUS_NO_SHOWS, &text)?);
        }
    }
    if let Some(series) = source.chronic_condition {
        record.chronic_condition = read_flag(series, idx, row, names::CHRONIC_CONDITION)?;
    }
    if let Some(series) = source.sms_received {
        record.sms_received = read_flag(series, idx, row, names::SMS_RECEIVED)?;
    }
    Ok(record)
}

fn read_flag(series: &Series, idx: usize, row: usize, column: &'static str) -> Result<Option<bool>> {
    let text = cell(series, idx)?;
    if text.is_empty() {
        return Ok(None);
    }
    parse_flag(&text)
        .map(Some)
        .ok_or_else(|| invalid(row, column, &text, "expected a 0/1 flag"))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Wait-time column name for a unit, used when writing frames back out.
pub fn wait_time_column(unit: WaitUnit) -> &'static str {
    match unit {
        WaitUnit::Days => names::WAIT_TIME_DAYS,
        WaitUnit::Minutes => names::WAIT_TIME_MINUTES,
    }
}
