//! CLI argument definitions for the appointment risk dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use clinic_model::{
    AppointmentStatus, DEFAULT_BATCH_SIZE, DEFAULT_RISK_THRESHOLD, Department, EngineOptions,
    ReclampPolicy,
};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clinic-risk",
    version,
    about = "Appointment no-show dashboard with risk-based batch reallocation",
    long_about = "Load an appointment CSV, filter it, and report no-show metrics,\n\
                  a department by age heatmap, and high-risk reallocation progress."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print metrics, department counts, risk summary and the no-show heatmap.
    Summary(SummaryArgs),

    /// Trigger batch reallocation steps and report progress.
    Reallocate(ReallocateArgs),

    /// Write the filtered rows to a CSV file.
    Export(ExportArgs),

    /// List the supported departments.
    Departments,
}

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Appointment CSV file.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Skip rows that fail validation instead of aborting.
    #[arg(long = "skip-invalid-rows")]
    pub skip_invalid_rows: bool,
}

/// Filter flags. Omitted flags keep the full observed domain.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Departments to keep (repeat or comma-separate).
    #[arg(long = "department", value_delimiter = ',', value_name = "DEPT")]
    pub departments: Vec<Department>,

    /// Genders to keep.
    #[arg(long = "gender", value_delimiter = ',', value_name = "GENDER")]
    pub genders: Vec<String>,

    /// Insurance types to keep.
    #[arg(long = "insurance", value_delimiter = ',', value_name = "TYPE")]
    pub insurance: Vec<String>,

    /// Appointment statuses to keep (Show, No-Show).
    #[arg(long = "status", value_delimiter = ',', value_name = "STATUS")]
    pub statuses: Vec<AppointmentStatus>,

    /// Lowest age to keep (inclusive).
    #[arg(long = "age-min", value_name = "YEARS")]
    pub age_min: Option<u32>,

    /// Highest age to keep (inclusive).
    #[arg(long = "age-max", value_name = "YEARS")]
    pub age_max: Option<u32>,

    /// Shortest wait time to keep (inclusive, in the file's unit).
    #[arg(long = "wait-min", value_name = "N")]
    pub wait_min: Option<u32>,

    /// Longest wait time to keep (inclusive, in the file's unit).
    #[arg(long = "wait-max", value_name = "N")]
    pub wait_max: Option<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Previous no-shows at which an appointment counts as high risk.
    #[arg(long = "risk-threshold", default_value_t = DEFAULT_RISK_THRESHOLD)]
    pub risk_threshold: u32,

    /// High-risk slots handled per reallocation step.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u32,

    /// Counter behavior when the filter changes.
    #[arg(long = "reclamp", value_enum, default_value = "preserve")]
    pub reclamp: ReclampArg,
}

impl EngineArgs {
    pub fn options(&self) -> EngineOptions {
        EngineOptions::new()
            .with_risk_threshold(self.risk_threshold)
            .with_batch_size(self.batch_size)
            .with_reclamp_policy(self.reclamp.into())
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Also print the first N filtered appointments.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Emit the dashboard snapshot as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ReallocateArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Number of reallocation triggers to fire.
    #[arg(long = "steps", default_value_t = 1)]
    pub steps: usize,

    /// After the steps, narrow the filter to this department and report.
    #[arg(long = "narrow-department", value_name = "DEPT")]
    pub narrow_department: Option<Department>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Destination CSV path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReclampArg {
    Preserve,
    ClampOnEvaluate,
}

impl From<ReclampArg> for ReclampPolicy {
    fn from(arg: ReclampArg) -> Self {
        match arg {
            ReclampArg::Preserve => ReclampPolicy::Preserve,
            ReclampArg::ClampOnEvaluate => ReclampPolicy::ClampOnEvaluate,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
