//! Individual service station state

use serde::{Deserialize, Serialize};

/// Sentinel for `next_free_minute` while no customer is being served.
pub const NO_CUSTOMER: i32 = -1;

/// One service position on the floor.
///
/// While `occupied` is true, `next_free_minute` is the minute of day at which
/// the current customer's service completes; otherwise it is [`NO_CUSTOMER`]
/// and carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Stable zero-based identity, assigned at pool creation.
    pub id: usize,
    /// Customers waiting at this station (not counting the one being served).
    pub queue_length: u32,
    /// Whether this station is staffed during the current shift. An
    /// unavailable station accepts no new customers but keeps serving the
    /// one it has, and keeps the queue it already holds.
    pub available: bool,
    /// Whether a customer is being served this minute.
    pub occupied: bool,
    /// Minute of day at which the current service completes.
    pub next_free_minute: i32,
}

impl Station {
    /// Create an idle station.
    pub fn new(id: usize, available: bool) -> Self {
        Self {
            id,
            queue_length: 0,
            available,
            occupied: false,
            next_free_minute: NO_CUSTOMER,
        }
    }

    /// True when the station is neither serving nor holding a queue.
    pub fn is_idle(&self) -> bool {
        !self.occupied && self.queue_length == 0
    }

    /// Start serving a customer now, finishing after `duration` minutes.
    pub fn begin_service(&mut self, minute: u32, duration: u32) {
        self.occupied = true;
        self.next_free_minute = (minute + duration) as i32;
    }

    /// True when the customer in service completes at `minute`.
    pub fn service_due(&self, minute: u32) -> bool {
        self.occupied && self.next_free_minute == minute as i32
    }

    /// Record the completion of the customer in service. If the queue is
    /// non-empty the next customer starts immediately with the given
    /// duration; otherwise the station falls idle.
    pub fn complete_service(&mut self, minute: u32, next_duration: impl FnOnce() -> u32) {
        if self.queue_length > 0 {
            self.queue_length -= 1;
            self.next_free_minute = (minute + next_duration()) as i32;
        } else {
            self.occupied = false;
            self.next_free_minute = NO_CUSTOMER;
        }
    }

    /// Add one customer to the waiting queue.
    pub fn enqueue(&mut self) {
        self.queue_length += 1;
    }
}
