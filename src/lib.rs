//! Service Floor Simulator
//!
//! A discrete-time simulation of a multi-station customer service floor
//! (a bank branch, a customer-service counter row) stepped minute by minute
//! over one or more simulated days.
//!
//! # Overview
//!
//! Each simulated day is 1440 minutes. Customers arrive with a
//! time-of-day-dependent probability, are routed to the least loaded open
//! station, wait in that station's queue, and are counted when their service
//! completes. Staffing is split between a morning and an afternoon shift;
//! the split is redrawn every day. One report is published per completed day
//! plus a final run-total report.
//!
//! ## Module Organization
//!
//! - [`types`]: configuration and identifier types
//! - [`station`]: station records and the station pool
//! - [`simulation`]: minute clock, shift schedule, randomness, errors, logging
//! - [`report`]: report shape and per-day/run accumulation
//! - [`sink`]: report publishing targets
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod report;
pub mod simulation;
pub mod sink;
pub mod station;
pub mod types;

// Re-export the types most callers need.
pub use report::{Report, ReportAccumulator};
pub use simulation::{
    LoggingConfig, RandomProcess, RunSummary, ShiftPhase, ShiftScheduler, SimulationClock,
    SimulationError, SimulationResult, UniformRandomProcess,
};
pub use sink::{CsvReportSink, JsonLineSink, RecordingSink, ReportSink};
pub use station::{RoutingOutcome, Station, StationPool, TickDeltas};
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, OutputFormat, ReportId, SimulationConfig,
};
