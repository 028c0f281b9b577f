//! Type-safe enumerations for appointment records.
//!
//! The dataset stores these as free text; parsing is lenient about case and
//! surrounding whitespace so that hand-edited CSV files still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Hospital department an appointment is booked into.
///
/// The set is fixed ahead of aggregation so heatmap output never depends on
/// which departments happen to appear in a given table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Cardiology,
    Pediatrics,
    #[serde(rename = "OPD")]
    Opd,
    Orthopedics,
    General,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Department; 5] = [
        Department::Cardiology,
        Department::Pediatrics,
        Department::Opd,
        Department::Orthopedics,
        Department::General,
    ];

    /// Returns the label as it appears in source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Pediatrics => "Pediatrics",
            Department::Opd => "OPD",
            Department::Orthopedics => "Orthopedics",
            Department::General => "General",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Department {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "CARDIOLOGY" => Ok(Department::Cardiology),
            "PEDIATRICS" | "PAEDIATRICS" => Ok(Department::Pediatrics),
            "OPD" | "OUTPATIENT" => Ok(Department::Opd),
            "ORTHOPEDICS" | "ORTHOPAEDICS" => Ok(Department::Orthopedics),
            "GENERAL" => Ok(Department::General),
            _ => Err(ModelError::UnknownDepartment(s.to_string())),
        }
    }
}

/// Attendance outcome of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Show,
    #[serde(rename = "No-Show")]
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 2] = [AppointmentStatus::Show, AppointmentStatus::NoShow];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Show => "Show",
            AppointmentStatus::NoShow => "No-Show",
        }
    }

    pub fn is_no_show(&self) -> bool {
        matches!(self, AppointmentStatus::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ModelError;

    /// Accepts `Show`, `No-Show`, `NoShow` and `No Show` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_uppercase();

        match compact.as_str() {
            "SHOW" => Ok(AppointmentStatus::Show),
            "NOSHOW" => Ok(AppointmentStatus::NoShow),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// Unit of the wait-time column. Dataset variants record either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUnit {
    #[default]
    Days,
    Minutes,
}

impl WaitUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitUnit::Days => "days",
            WaitUnit::Minutes => "minutes",
        }
    }
}

impl fmt::Display for WaitUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WaitUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" | "d" => Ok(WaitUnit::Days),
            "minutes" | "minute" | "min" | "m" => Ok(WaitUnit::Minutes),
            _ => Err(ModelError::UnknownWaitUnit(s.to_string())),
        }
    }
}

/// Largest age covered by the age bins (inclusive).
pub const MAX_BINNED_AGE: u32 = 100;

/// Age bin used by the no-show heatmap.
///
/// Bins are half-open `[lower, upper)` except the last, which is closed so
/// that an age of exactly 100 still lands in a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBin {
    #[serde(rename = "0-20")]
    Under20,
    #[serde(rename = "20-40")]
    From20To40,
    #[serde(rename = "40-60")]
    From40To60,
    #[serde(rename = "60-80")]
    From60To80,
    #[serde(rename = "80-100")]
    From80To100,
}

impl AgeBin {
    /// All bins in ascending order.
    pub const ALL: [AgeBin; 5] = [
        AgeBin::Under20,
        AgeBin::From20To40,
        AgeBin::From40To60,
        AgeBin::From60To80,
        AgeBin::From80To100,
    ];

    /// Returns the bin containing `age`, or `None` above [`MAX_BINNED_AGE`].
    pub fn from_age(age: u32) -> Option<Self> {
        match age {
            0..20 => Some(AgeBin::Under20),
            20..40 => Some(AgeBin::From20To40),
            40..60 => Some(AgeBin::From40To60),
            60..80 => Some(AgeBin::From60To80),
            80..=MAX_BINNED_AGE => Some(AgeBin::From80To100),
            _ => None,
        }
    }

    /// Inclusive lower bound.
    pub fn lower(&self) -> u32 {
        match self {
            AgeBin::Under20 => 0,
            AgeBin::From20To40 => 20,
            AgeBin::From40To60 => 40,
            AgeBin::From60To80 => 60,
            AgeBin::From80To100 => 80,
        }
    }

    /// Upper bound; exclusive for every bin but the last.
    pub fn upper(&self) -> u32 {
        self.lower() + 20
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBin::Under20 => "0-20",
            AgeBin::From20To40 => "20-40",
            AgeBin::From40To60 => "40-60",
            AgeBin::From60To80 => "60-80",
            AgeBin::From80To100 => "80-100",
        }
    }
}

impl fmt::Display for AgeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_from_str() {
        assert_eq!("opd".parse::<Department>().unwrap(), Department::Opd);
        assert_eq!(
            " Cardiology ".parse::<Department>().unwrap(),
            Department::Cardiology
        );
        assert_eq!(
            "ORTHOPAEDICS".parse::<Department>().unwrap(),
            Department::Orthopedics
        );
        assert!("Radiology".parse::<Department>().is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "No-Show".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::NoShow
        );
        assert_eq!(
            "no show".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::NoShow
        );
        assert_eq!(
            "SHOW".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Show
        );
        assert!("cancelled".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_age_bin_boundaries() {
        assert_eq!(AgeBin::from_age(0), Some(AgeBin::Under20));
        assert_eq!(AgeBin::from_age(19), Some(AgeBin::Under20));
        assert_eq!(AgeBin::from_age(20), Some(AgeBin::From20To40));
        assert_eq!(AgeBin::from_age(79), Some(AgeBin::From60To80));
        assert_eq!(AgeBin::from_age(80), Some(AgeBin::From80To100));
        assert_eq!(AgeBin::from_age(100), Some(AgeBin::From80To100));
        assert_eq!(AgeBin::from_age(101), None);
    }

    #[test]
    fn test_age_bins_are_ordered() {
        for pair in AgeBin::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].upper(), pair[1].lower());
        }
    }
}
