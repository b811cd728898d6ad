//! Reports and their accumulation
//!
//! One report is produced per completed day plus one run-total report, all
//! carrying the same run-scoped [`ReportId`](crate::types::ReportId).

pub mod accumulator;
pub mod report;

pub use accumulator::ReportAccumulator;
pub use report::Report;
