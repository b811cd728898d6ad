//! The published report shape

use crate::types::ReportId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregated customer counts for one day or for the whole run.
///
/// The wire shape is a flat record of exactly these five fields. The field
/// names are shared with existing downstream consumers and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Identifier shared by every report of the run.
    #[serde(rename = "ReportId")]
    pub report_id: ReportId,

    /// Customers whose service completed during the morning shift.
    #[serde(rename = "CustomersAttendedInMorningShift")]
    pub morning_count: u64,

    /// Customers whose service completed during the afternoon shift.
    #[serde(rename = "CustomerAttendedInAfternoonShift")]
    pub afternoon_count: u64,

    /// All customers served in the period this report covers.
    #[serde(rename = "CustomerAttendedCount")]
    pub total_count: u64,

    /// Free-text description of the period ("day 3 report", "final report").
    #[serde(rename = "Message")]
    pub label: String,
}

impl Report {
    /// Create a report over explicit counts.
    pub fn new(
        report_id: ReportId,
        morning_count: u64,
        afternoon_count: u64,
        total_count: u64,
        label: impl Into<String>,
    ) -> Self {
        Self { report_id, morning_count, afternoon_count, total_count, label: label.into() }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} served ({} morning, {} afternoon)",
            self.label, self.total_count, self.morning_count, self.afternoon_count
        )
    }
}
