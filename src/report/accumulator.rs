//! Per-day and run-total report accumulation
//!
//! The accumulator owns two sets of counts under one run-scoped id: the day
//! currently being stepped, and the run totals. Day counts reset at every
//! day boundary after folding into the run; emitted reports are snapshots
//! and never mutated again.

use crate::report::Report;
use crate::station::TickDeltas;
use crate::types::ReportId;

/// Customer counts for one accumulation period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ShiftCounts {
    morning: u64,
    afternoon: u64,
    total: u64,
}

impl ShiftCounts {
    fn add(&mut self, deltas: TickDeltas) {
        self.morning += u64::from(deltas.morning);
        self.afternoon += u64::from(deltas.afternoon);
        self.total += u64::from(deltas.total());
    }

    fn fold(&mut self, other: ShiftCounts) {
        self.morning += other.morning;
        self.afternoon += other.afternoon;
        self.total += other.total;
    }
}

/// Collects service-completion counts into daily reports and a run total.
#[derive(Debug)]
pub struct ReportAccumulator {
    report_id: ReportId,
    day: ShiftCounts,
    run: ShiftCounts,
    days_completed: u32,
}

impl ReportAccumulator {
    /// Create an accumulator for a new run with a fresh report id.
    pub fn new() -> Self {
        Self::with_report_id(ReportId::new())
    }

    /// Create an accumulator publishing under a caller-chosen id.
    pub fn with_report_id(report_id: ReportId) -> Self {
        Self {
            report_id,
            day: ShiftCounts::default(),
            run: ShiftCounts::default(),
            days_completed: 0,
        }
    }

    /// The id shared by every report of this run.
    pub fn report_id(&self) -> ReportId {
        self.report_id
    }

    /// Fold one minute step's completions into the current day.
    pub fn record(&mut self, deltas: TickDeltas) {
        self.day.add(deltas);
    }

    /// Close the current day: fold its counts into the run total, emit the
    /// day's snapshot, and start the next day from zero.
    pub fn finish_day(&mut self) -> Report {
        self.run.fold(self.day);
        self.days_completed += 1;

        let report = Report::new(
            self.report_id,
            self.day.morning,
            self.day.afternoon,
            self.day.total,
            format!("day {} report", self.days_completed),
        );
        self.day = ShiftCounts::default();
        report
    }

    /// Emit the run-total snapshot over all completed days.
    pub fn finish_run(&self) -> Report {
        Report::new(
            self.report_id,
            self.run.morning,
            self.run.afternoon,
            self.run.total,
            "final report",
        )
    }

    /// Days folded into the run total so far.
    pub fn days_completed(&self) -> u32 {
        self.days_completed
    }
}

impl Default for ReportAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
