use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate appointment id: {0}")]
    DuplicateAppointmentId(i64),
    #[error("unknown department: {0}")]
    UnknownDepartment(String),
    #[error("unknown appointment status: {0}")]
    UnknownStatus(String),
    #[error("unknown wait time unit: {0}")]
    UnknownWaitUnit(String),
    #[error("invalid interval: low {low} is greater than high {high}")]
    InvalidInterval { low: u32, high: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
