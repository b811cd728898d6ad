//! Shift phases and the fixed daily schedule
//!
//! The schedule is a declarative table of minute-of-day thresholds. Each
//! entry sets the arrival frequency from that minute on; two entries also
//! carry an action (day start, shift change). The scheduler evaluates the
//! table once per simulated minute and owns the phase and frequency state
//! between thresholds.

use tracing::debug;

/// Minutes in one simulated day.
pub const MINUTES_IN_A_DAY: u32 = 1440;

/// Minute of day after which no new customers are admitted. Doors close 20
/// minutes before 13:00; service continues for the rest of the day.
pub const ARRIVAL_CUTOFF_MINUTE: u32 = 13 * 60 - 20;

/// Half-day staffing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPhase {
    /// First shift of the day; low station ids are staffed.
    Morning,
    /// Second shift; high station ids are staffed.
    Afternoon,
}

/// Action a schedule threshold asks the clock to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftEvent {
    /// Minute 0: reset the floor and open the morning shift.
    DayStart,
    /// Mid-day: restaff the floor for the afternoon shift.
    ShiftChange,
}

/// One row of the fixed daily schedule.
#[derive(Debug, Clone, Copy)]
struct ScheduleEntry {
    /// Minute of day at which this entry takes effect. The original system
    /// compared `minute + 1` against whole hours, so thresholds land one
    /// minute before them (179 rather than 180).
    minute: u32,
    /// Arrival probability in effect from this minute on.
    frequency: f32,
    event: Option<ShiftEvent>,
}

/// Fixed simulation parameters, not configuration.
const SHIFT_SCHEDULE: [ScheduleEntry; 5] = [
    ScheduleEntry { minute: 0, frequency: 0.31, event: Some(ShiftEvent::DayStart) },
    ScheduleEntry { minute: 179, frequency: 0.46, event: None },
    ScheduleEntry { minute: 359, frequency: 0.55, event: None },
    ScheduleEntry { minute: 449, frequency: 0.23, event: Some(ShiftEvent::ShiftChange) },
    ScheduleEntry { minute: 539, frequency: 0.73, event: None },
];

/// Minute-indexed step function mapping the time of day to shift phase and
/// arrival frequency.
#[derive(Debug, Clone)]
pub struct ShiftScheduler {
    phase: ShiftPhase,
    frequency: f32,
}

impl ShiftScheduler {
    /// Create a scheduler positioned at the start of a day.
    pub fn new() -> Self {
        Self { phase: ShiftPhase::Morning, frequency: SHIFT_SCHEDULE[0].frequency }
    }

    /// Evaluate the schedule for one minute of the day. Updates the owned
    /// frequency and phase when a threshold is crossed and reports the
    /// action, if any, the clock must take.
    pub fn evaluate(&mut self, minute_of_day: u32) -> Option<ShiftEvent> {
        let entry = SHIFT_SCHEDULE.iter().find(|entry| entry.minute == minute_of_day)?;

        self.frequency = entry.frequency;
        match entry.event {
            Some(ShiftEvent::DayStart) => self.phase = ShiftPhase::Morning,
            Some(ShiftEvent::ShiftChange) => self.phase = ShiftPhase::Afternoon,
            None => {}
        }
        debug!(
            minute_of_day,
            frequency = self.frequency,
            phase = ?self.phase,
            "schedule threshold crossed"
        );
        entry.event
    }

    /// The shift currently in effect.
    pub fn phase(&self) -> ShiftPhase {
        self.phase
    }

    /// The arrival probability currently in effect.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Whether new customers are still admitted at this minute of the day.
    pub fn arrivals_open(&self, minute_of_day: u32) -> bool {
        minute_of_day < ARRIVAL_CUTOFF_MINUTE
    }
}

impl Default for ShiftScheduler {
    fn default() -> Self {
        Self::new()
    }
}
