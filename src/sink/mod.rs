//! Report publishing targets
//!
//! The simulation core only needs `publish(report)`; everything behind that
//! call (stdout, files, a message broker) is a sink implementation. A failed
//! publish aborts the run, so sinks report errors instead of swallowing
//! them.

use crate::report::Report;
use crate::simulation::error::{SimulationError, SimulationResult};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Consumer of finished report snapshots.
pub trait ReportSink {
    /// Publish one report. Called once per completed day and once at run
    /// end; an error is fatal to the run.
    fn publish(&mut self, report: &Report) -> SimulationResult<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn publish(&mut self, report: &Report) -> SimulationResult<()> {
        (**self).publish(report)
    }
}

/// Writes each report as one JSON object per line.
#[derive(Debug)]
pub struct JsonLineSink<W: Write> {
    writer: BufWriter<W>,
}

impl JsonLineSink<io::Stdout> {
    /// Publish JSON lines to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLineSink<W> {
    /// Publish JSON lines to an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer: BufWriter::new(writer) }
    }

    /// Consume the sink, flushing and returning the underlying writer.
    pub fn into_inner(self) -> SimulationResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| SimulationError::publish_error(format!("flush failed: {}", e)))
    }
}

impl<W: Write> ReportSink for JsonLineSink<W> {
    fn publish(&mut self, report: &Report) -> SimulationResult<()> {
        let line = serde_json::to_string(report)?;
        writeln!(self.writer, "{}", line)
            .map_err(|e| SimulationError::publish_error(e.to_string()))?;
        // Each report must be visible as soon as it is published.
        self.writer.flush().map_err(|e| SimulationError::publish_error(e.to_string()))?;
        debug!(label = %report.label, "report published as JSON line");
        Ok(())
    }
}

/// Appends each report to a per-run CSV file, `<dir>/<ReportId>.csv`.
///
/// The line layout `total,morning,afternoon,label` and the file naming are
/// shared with an existing downstream consumer and must not change.
#[derive(Debug)]
pub struct CsvReportSink {
    directory: PathBuf,
}

impl CsvReportSink {
    /// Create the sink, creating the target directory if needed.
    pub fn new(directory: impl Into<PathBuf>) -> SimulationResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).map_err(|e| {
            SimulationError::sink_setup_error(format!(
                "cannot create reports directory {}: {}",
                directory.display(),
                e
            ))
        })?;
        info!(directory = %directory.display(), "CSV report sink ready");
        Ok(Self { directory })
    }

    /// Path of the file a given report lands in.
    pub fn file_for(&self, report: &Report) -> PathBuf {
        self.directory.join(format!("{}.csv", report.report_id))
    }
}

impl ReportSink for CsvReportSink {
    fn publish(&mut self, report: &Report) -> SimulationResult<()> {
        let path = self.file_for(report);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| SimulationError::publish_error(format!("{}: {}", path.display(), e)))?;

        writeln!(
            file,
            "{},{},{},{}",
            report.total_count, report.morning_count, report.afternoon_count, report.label
        )
        .map_err(|e| SimulationError::publish_error(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), label = %report.label, "report appended to CSV");
        Ok(())
    }
}

/// In-memory sink that keeps every published report, for tests and
/// diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSink {
    published: Vec<Report>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports published so far, in publish order.
    pub fn published(&self) -> &[Report] {
        &self.published
    }
}

impl ReportSink for RecordingSink {
    fn publish(&mut self, report: &Report) -> SimulationResult<()> {
        self.published.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReportId;

    fn sample_report(id: ReportId, label: &str) -> Report {
        Report::new(id, 2, 3, 5, label)
    }

    #[test]
    fn test_json_line_sink_emits_one_line_per_report() {
        let mut sink = JsonLineSink::new(Vec::new());
        let id = ReportId::new();
        sink.publish(&sample_report(id, "day 1 report")).unwrap();
        sink.publish(&sample_report(id, "final report")).unwrap();

        let bytes = sink.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Report = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.label, "day 1 report");
        assert_eq!(first.total_count, 5);
    }

    #[test]
    fn test_csv_sink_appends_to_one_file_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvReportSink::new(dir.path()).unwrap();
        let id = ReportId::new();

        sink.publish(&sample_report(id, "day 1 report")).unwrap();
        sink.publish(&sample_report(id, "final report")).unwrap();

        let path = dir.path().join(format!("{}.csv", id));
        let content = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["5,2,3,day 1 report", "5,2,3,final report"]);
    }

    #[test]
    fn test_csv_sink_separates_runs_by_report_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvReportSink::new(dir.path()).unwrap();

        sink.publish(&sample_report(ReportId::new(), "day 1 report")).unwrap();
        sink.publish(&sample_report(ReportId::new(), "day 1 report")).unwrap();

        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);
    }

    #[test]
    fn test_recording_sink_keeps_publish_order() {
        let mut sink = RecordingSink::new();
        let id = ReportId::new();
        sink.publish(&sample_report(id, "day 1 report")).unwrap();
        sink.publish(&sample_report(id, "day 2 report")).unwrap();

        let labels: Vec<&str> =
            sink.published().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["day 1 report", "day 2 report"]);
    }
}
