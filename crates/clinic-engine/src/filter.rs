//! Filter evaluation.
//!
//! A record passes when it satisfies every constraint set on the
//! [`FilterSpec`]. Predicates are side-effect free, so evaluation order
//! does not matter.

use std::collections::BTreeSet;

use clinic_model::{Appointment, FilterSpec, Interval, RecordTable};

use crate::view::FilteredView;

fn allows<T: Ord>(allowed: Option<&BTreeSet<T>>, value: &T) -> bool {
    allowed.is_none_or(|set| set.contains(value))
}

/// An unset value never satisfies a set constraint on its field.
fn allows_optional(allowed: Option<&BTreeSet<String>>, value: Option<&String>) -> bool {
    match (allowed, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(set), Some(value)) => set.contains(value),
    }
}

fn within(interval: Option<&Interval>, value: u32) -> bool {
    interval.is_none_or(|interval| interval.contains(value))
}

/// True when `record` satisfies every constraint in `spec`.
pub fn record_matches(record: &Appointment, spec: &FilterSpec) -> bool {
    allows(spec.departments.as_ref(), &record.department)
        && allows(spec.statuses.as_ref(), &record.status)
        && allows_optional(spec.genders.as_ref(), record.gender.as_ref())
        && allows_optional(spec.insurance.as_ref(), record.insurance.as_ref())
        && within(spec.age.as_ref(), record.age)
        && within(spec.wait_time.as_ref(), record.wait_time)
}

/// Apply `spec` to the whole table.
pub fn apply_filter<'a>(table: &'a RecordTable, spec: &FilterSpec) -> FilteredView<'a> {
    FilteredView::all(table).subset(|record| record_matches(record, spec))
}
