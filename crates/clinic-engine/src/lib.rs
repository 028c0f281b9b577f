//! Risk scoring, filtering and batch reallocation over appointment tables.
//!
//! [`evaluate`] is a pure function of a table, a filter and the engine
//! options. The only state kept between calls is the reallocation counter,
//! owned by a [`DashboardSession`].

pub mod filter;
pub mod frame;
pub mod heatmap;
pub mod metrics;
pub mod pipeline;
pub mod reallocation;
pub mod risk;
pub mod session;
pub mod view;

pub use filter::{apply_filter, record_matches};
pub use frame::{table_to_frame, view_to_frame};
pub use heatmap::{Heatmap, HeatmapCell};
pub use metrics::{
    DepartmentCount, Metrics, compute_metrics, department_counts, format_percent, percentage,
    round_one_decimal,
};
pub use pipeline::{DashboardSnapshot, Evaluation, evaluate};
pub use reallocation::{
    AdvanceOutcome, BatchReallocator, ReallocationState, ReallocationStatus, efficiency,
};
pub use risk::{RiskClassifier, RiskLabel, RiskPartition, RiskSummary};
pub use session::{DashboardSession, SessionId, SessionStore};
pub use view::FilteredView;
