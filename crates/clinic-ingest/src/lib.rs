//! Appointment data ingestion.
//!
//! Loads appointment CSV files into a [`clinic_model::RecordTable`],
//! resolving the header spellings used by the different dataset variants.

pub mod columns;
pub mod error;
pub mod loader;
pub mod polars_utils;

pub use columns::{ColumnMap, ColumnRole, compact_key, names, role_for_header};
pub use error::{IngestError, Result};
pub use loader::{
    IngestOptions, read_appointments_csv, read_appointments_csv_with_options, read_csv_frame,
    table_from_frame, wait_time_column,
};
pub use polars_utils::{any_to_string, any_to_string_non_empty, format_numeric, parse_flag, parse_whole};
