//! Turn filter flags into a [`FilterSpec`].
//!
//! Every field starts from the table's full observed domain; a flag replaces
//! the domain for its field only. One-sided numeric bounds keep the observed
//! limit on the other side.

use clinic_model::{FilterSpec, Interval, RecordTable, Result};

use crate::cli::FilterArgs;

fn interval(
    observed: Option<(u32, u32)>,
    low: Option<u32>,
    high: Option<u32>,
) -> Result<Option<Interval>> {
    if low.is_none() && high.is_none() {
        return observed.map(|(low, high)| Interval::new(low, high)).transpose();
    }
    let (observed_low, observed_high) = observed.unwrap_or((0, u32::MAX));
    Interval::new(low.unwrap_or(observed_low), high.unwrap_or(observed_high)).map(Some)
}

pub fn resolve_filter(table: &RecordTable, args: &FilterArgs) -> Result<FilterSpec> {
    let mut spec = FilterSpec::full_domain(table);
    if !args.departments.is_empty() {
        spec = spec.with_departments(args.departments.iter().copied());
    }
    if !args.genders.is_empty() {
        spec = spec.with_genders(args.genders.iter().cloned());
    }
    if !args.insurance.is_empty() {
        spec = spec.with_insurance(args.insurance.iter().cloned());
    }
    if !args.statuses.is_empty() {
        spec = spec.with_statuses(args.statuses.iter().copied());
    }
    spec.age = interval(table.age_range(), args.age_min, args.age_max)?;
    spec.wait_time = interval(table.wait_time_range(), args.wait_min, args.wait_max)?;
    Ok(spec)
}
