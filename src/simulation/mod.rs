//! Simulation orchestration and control
//!
//! The minute-stepping clock, the shift schedule it consults, the random
//! process behind arrivals and service durations, and the ambient error and
//! logging plumbing.

pub mod clock;
pub mod error;
pub mod logging;
pub mod random;
pub mod shift;

pub use clock::{RunSummary, SimulationClock};
pub use error::{SimulationError, SimulationResult};
pub use logging::LoggingConfig;
pub use random::{RandomProcess, UniformRandomProcess};
pub use shift::{ShiftEvent, ShiftPhase, ShiftScheduler, ARRIVAL_CUTOFF_MINUTE, MINUTES_IN_A_DAY};
