//! Operator filter constraints.
//!
//! A [`FilterSpec`] is a conjunction of optional constraints. `None` leaves a
//! field unconstrained; `Some` of an empty set matches nothing, so callers that
//! mean "no restriction" either leave the field unset or pass the full domain
//! (see [`FilterSpec::full_domain`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::appointment::RecordTable;
use crate::enums::{AppointmentStatus, Department};
use crate::error::{ModelError, Result};

/// Closed numeric interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    low: u32,
    high: u32,
}

impl Interval {
    pub fn new(low: u32, high: u32) -> Result<Self> {
        if low > high {
            return Err(ModelError::InvalidInterval { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, value: u32) -> bool {
        self.low <= value && value <= self.high
    }

    /// True when every value of `self` also lies in `other`.
    pub fn is_within(&self, other: &Interval) -> bool {
        other.low <= self.low && self.high <= other.high
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub departments: Option<BTreeSet<Department>>,
    pub genders: Option<BTreeSet<String>>,
    pub insurance: Option<BTreeSet<String>>,
    pub statuses: Option<BTreeSet<AppointmentStatus>>,
    pub age: Option<Interval>,
    pub wait_time: Option<Interval>,
}

impl FilterSpec {
    /// A spec with no constraints; matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// The operator default: every category and the full numeric range seen
    /// in `table`. An optional field stays unconstrained when its column is
    /// absent or any record leaves it blank, so the default matches every row.
    pub fn full_domain(table: &RecordTable) -> Self {
        let columns = table.columns();
        let records = table.records();
        let to_interval =
            |range: Option<(u32, u32)>| range.and_then(|(low, high)| Interval::new(low, high).ok());
        let all_genders = columns.gender && records.iter().all(|r| r.gender.is_some());
        let all_insured = columns.insurance && records.iter().all(|r| r.insurance.is_some());
        Self {
            departments: Some(table.departments()),
            genders: all_genders.then(|| table.genders()),
            insurance: all_insured.then(|| table.insurance_types()),
            statuses: Some(AppointmentStatus::ALL.into_iter().collect()),
            age: to_interval(table.age_range()),
            wait_time: to_interval(table.wait_time_range()),
        }
    }

    pub fn with_departments(mut self, departments: impl IntoIterator<Item = Department>) -> Self {
        self.departments = Some(departments.into_iter().collect());
        self
    }

    pub fn with_genders<S: Into<String>>(mut self, genders: impl IntoIterator<Item = S>) -> Self {
        self.genders = Some(genders.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_insurance<S: Into<String>>(
        mut self,
        insurance: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insurance = Some(insurance.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = AppointmentStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_age_range(mut self, low: u32, high: u32) -> Result<Self> {
        self.age = Some(Interval::new(low, high)?);
        Ok(self)
    }

    pub fn with_wait_time_range(mut self, low: u32, high: u32) -> Result<Self> {
        self.wait_time = Some(Interval::new(low, high)?);
        Ok(self)
    }

    /// True when no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.departments.is_none()
            && self.genders.is_none()
            && self.insurance.is_none()
            && self.statuses.is_none()
            && self.age.is_none()
            && self.wait_time.is_none()
    }

    /// True when every record accepted by `self` is also accepted by `other`,
    /// judged from the constraints alone.
    pub fn is_narrower_than(&self, other: &FilterSpec) -> bool {
        fn set_within<T: Ord>(narrow: Option<&BTreeSet<T>>, wide: Option<&BTreeSet<T>>) -> bool {
            match (narrow, wide) {
                (_, None) => true,
                (None, Some(_)) => false,
                (Some(n), Some(w)) => n.is_subset(w),
            }
        }
        fn interval_within(narrow: Option<&Interval>, wide: Option<&Interval>) -> bool {
            match (narrow, wide) {
                (_, None) => true,
                (None, Some(_)) => false,
                (Some(n), Some(w)) => n.is_within(w),
            }
        }
        set_within(self.departments.as_ref(), other.departments.as_ref())
            && set_within(self.genders.as_ref(), other.genders.as_ref())
            && set_within(self.insurance.as_ref(), other.insurance.as_ref())
            && set_within(self.statuses.as_ref(), other.statuses.as_ref())
            && interval_within(self.age.as_ref(), other.age.as_ref())
            && interval_within(self.wait_time.as_ref(), other.wait_time.as_ref())
    }
}
