//! Data model for the appointment risk dashboard.

pub mod appointment;
pub mod enums;
pub mod error;
pub mod filter;
pub mod options;

pub use appointment::{Appointment, ColumnPresence, RecordTable};
pub use enums::{AgeBin, AppointmentStatus, Department, MAX_BINNED_AGE, WaitUnit};
pub use error::{ModelError, Result};
pub use filter::{FilterSpec, Interval};
pub use options::{DEFAULT_BATCH_SIZE, DEFAULT_RISK_THRESHOLD, EngineOptions, ReclampPolicy};
