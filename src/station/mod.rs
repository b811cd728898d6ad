//! Service stations and the station pool
//!
//! A station is one service position: it serves one customer at a time and
//! holds a queue of waiting customers. The pool owns all stations for the
//! current day and applies arrival routing and per-minute completion
//! processing.

pub mod pool;
pub mod station;

pub use pool::{RoutingOutcome, StationPool, TickDeltas};
pub use station::{Station, NO_CUSTOMER};
