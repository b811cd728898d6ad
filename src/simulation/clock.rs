//! The minute-stepping simulation clock
//!
//! Drives `days × 1440` minute steps. Each minute the clock consults the
//! shift schedule, possibly admits one arriving customer, processes service
//! completions, and folds the completions into the running reports. Daily
//! reports are published at the day boundary and the final report after the
//! last day.

use crate::report::ReportAccumulator;
use crate::simulation::error::SimulationResult;
use crate::simulation::random::RandomProcess;
use crate::simulation::shift::{ShiftEvent, ShiftScheduler, MINUTES_IN_A_DAY};
use crate::sink::ReportSink;
use crate::station::StationPool;
use crate::types::{ReportId, SimulationConfig};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What one finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Identifier carried by every report the run published.
    pub report_id: ReportId,
    /// Days simulated.
    pub days: u32,
    /// Customers served across the run during morning shifts.
    pub morning_count: u64,
    /// Customers served across the run during afternoon shifts.
    pub afternoon_count: u64,
    /// Customers served across the run.
    pub total_count: u64,
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the run took.
    pub duration: Duration,
}

/// Drives the whole simulation: shift schedule, station pool, arrival
/// draws, report accumulation, and report publishing.
#[derive(Debug)]
pub struct SimulationClock<R: RandomProcess, S: ReportSink> {
    config: SimulationConfig,
    pool: StationPool,
    scheduler: ShiftScheduler,
    random: R,
    sink: S,
    /// Allocation draws are kept apart from the arrival/service process so
    /// a pinned test process does not constrain the daily staffing split.
    allocation_rng: StdRng,
    accumulator: ReportAccumulator,
    morning_resources: u32,
    /// Signed: a morning draw above the resource total leaves a negative
    /// remainder, which opens no stations in the afternoon.
    afternoon_resources: i64,
    step_pause: Duration,
}

impl<R: RandomProcess, S: ReportSink> SimulationClock<R, S> {
    /// Create a clock over a validated configuration.
    pub fn new(config: SimulationConfig, random: R, sink: S) -> Self {
        let allocation_rng = match config.seed {
            Some(seed) => {
                info!(seed, "using deterministic seed for shift allocation");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let step_pause = Duration::from_millis(config.step_pause_ms);

        Self {
            config,
            pool: StationPool::new(),
            scheduler: ShiftScheduler::new(),
            random,
            sink,
            allocation_rng,
            accumulator: ReportAccumulator::new(),
            morning_resources: 0,
            afternoon_resources: 0,
            step_pause,
        }
    }

    /// Run the full simulation, publishing one report per completed day and
    /// one final report. Any publish failure aborts the run.
    pub fn run(&mut self) -> SimulationResult<RunSummary> {
        let started_at = Utc::now();
        let timer = Instant::now();

        info!(
            days = self.config.days,
            station_count = self.config.station_count,
            resource_count = self.config.resource_count,
            report_id = %self.accumulator.report_id(),
            "simulation starting"
        );
        if self.config.resource_count <= 0 {
            warn!(
                resource_count = self.config.resource_count,
                "non-positive resource total: every afternoon shift will open no stations"
            );
        }

        for day in 1..=self.config.days {
            self.step_day(day)?;
        }

        let final_report = self.accumulator.finish_run();
        let summary = RunSummary {
            report_id: final_report.report_id,
            days: self.config.days,
            morning_count: final_report.morning_count,
            afternoon_count: final_report.afternoon_count,
            total_count: final_report.total_count,
            started_at,
            duration: timer.elapsed(),
        };
        self.sink.publish(&final_report)?;

        info!(
            total = summary.total_count,
            morning = summary.morning_count,
            afternoon = summary.afternoon_count,
            "simulation finished"
        );
        Ok(summary)
    }

    /// Step one full day and publish its report.
    fn step_day(&mut self, day: u32) -> SimulationResult<()> {
        for minute in 0..MINUTES_IN_A_DAY {
            self.step_minute(day, minute);
            if !self.step_pause.is_zero() {
                thread::sleep(self.step_pause);
            }
        }

        let daily = self.accumulator.finish_day();
        info!(
            day,
            total = daily.total_count,
            morning = daily.morning_count,
            afternoon = daily.afternoon_count,
            queued_at_close = self.pool.total_queued(),
            "day complete, publishing report"
        );
        self.sink.publish(&daily)
    }

    /// Advance the simulation by one minute.
    fn step_minute(&mut self, day: u32, minute: u32) {
        match self.scheduler.evaluate(minute) {
            Some(ShiftEvent::DayStart) => self.open_day(day),
            Some(ShiftEvent::ShiftChange) => self.open_afternoon(),
            None => {}
        }

        if self.scheduler.arrivals_open(minute)
            && self.random.arrival_occurs(self.scheduler.frequency())
        {
            let outcome = self.pool.route_arrival(minute, &mut self.random);
            debug!(minute, ?outcome, "customer arrived");
        }

        let deltas = self.pool.tick(minute, self.scheduler.phase(), &mut self.random);
        self.accumulator.record(deltas);
    }

    /// Draw the day's staffing split and reset the floor for the morning.
    fn open_day(&mut self, day: u32) {
        self.morning_resources = self.allocation_rng.gen_range(1..=self.config.station_count);
        self.afternoon_resources =
            self.config.resource_count - i64::from(self.morning_resources);

        self.pool.set_up(self.config.station_count, self.morning_resources);
        info!(
            day,
            morning_resources = self.morning_resources,
            afternoon_resources = self.afternoon_resources,
            "staff allocation drawn for the day"
        );
    }

    /// Restaff the floor for the afternoon shift.
    fn open_afternoon(&mut self) {
        self.pool.change_shift(self.afternoon_resources);
        info!(
            afternoon_resources = self.afternoon_resources,
            stations_open = self.pool.available_count(),
            "afternoon shift open"
        );
    }

    /// The sink this clock publishes into.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The station pool, for inspection between or after runs.
    pub fn pool(&self) -> &StationPool {
        &self.pool
    }

    /// The id every report of this run carries.
    pub fn report_id(&self) -> ReportId {
        self.accumulator.report_id()
    }
}
