//! Report module - layout-neutral simulation summary for document exporters.

mod report_builder;
mod report_model;

pub use report_builder::*;
pub use report_model::{latin1_safe, ReportRow, ReportSection, SimulationReport};
