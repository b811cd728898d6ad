//! Core types for the service floor simulator
//!
//! Configuration structures, the output format enum, and the run-scoped
//! report identifier.

pub mod config;
pub mod identifiers;

pub use config::{CliArgs, ConfigError, ConfigFile, ConfigValidationError, SimulationConfig};
pub use identifiers::ReportId;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where finished reports are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per report, written as a line to stdout.
    Json,
    /// One comma-separated line appended to `<reports-dir>/<ReportId>.csv`.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {} (supported: json, csv)", s)),
        }
    }
}
