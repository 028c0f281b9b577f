use std::path::PathBuf;

use clinic_model::ModelError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("CSV file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid {column} value '{value}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
