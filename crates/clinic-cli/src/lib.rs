//! CLI library components for the appointment risk dashboard.

pub mod cli;
pub mod filters;
pub mod logging;
pub mod render;
