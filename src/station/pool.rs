//! The station pool and its per-minute operations
//!
//! The pool owns every [`Station`] record for the current day. Arrival
//! routing and completion processing mutate stations in place through a
//! single index handle, so a selection computed by value can never go stale
//! against the record it is applied to.

use crate::simulation::random::RandomProcess;
use crate::simulation::shift::ShiftPhase;
use crate::station::station::Station;
use tracing::debug;

/// Service completions counted by one minute step, split by shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickDeltas {
    /// Completions attributed to the morning shift.
    pub morning: u32,
    /// Completions attributed to the afternoon shift.
    pub afternoon: u32,
}

impl TickDeltas {
    /// Total completions in this minute step.
    pub fn total(&self) -> u32 {
        self.morning + self.afternoon
    }
}

/// What happened to one routed arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingOutcome {
    /// The customer went straight into service at the given station.
    ServiceStarted(usize),
    /// The customer joined the given station's queue.
    Queued(usize),
    /// No station was available; the customer left unserved.
    Dropped,
}

/// All service stations for the current day.
#[derive(Debug, Clone, Default)]
pub struct StationPool {
    stations: Vec<Station>,
}

impl StationPool {
    /// Create an empty pool. Stations appear with the first [`set_up`] call.
    ///
    /// [`set_up`]: StationPool::set_up
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)initialize the pool for a new day: `station_count` stations, all
    /// queues empty, all unoccupied, and the first `available_count` ids
    /// staffed. The morning shift prefers low ids.
    pub fn set_up(&mut self, station_count: u32, available_count: u32) {
        self.stations = (0..station_count as usize)
            .map(|id| Station::new(id, id < available_count as usize))
            .collect();
        debug!(station_count, available_count, "station pool set up for a new day");
    }

    /// Re-derive availability for the afternoon shift: the last
    /// `available_count` ids are staffed. A non-positive count staffs no
    /// station at all.
    ///
    /// Occupancy, completion minutes, and queues are untouched: a station
    /// mid-service keeps serving to completion, and a station that just went
    /// off shift keeps draining the queue it already holds.
    pub fn change_shift(&mut self, available_count: i64) {
        let len = self.stations.len();
        for station in &mut self.stations {
            station.available = ((len - station.id - 1) as i64) < available_count;
        }
        debug!(available_count, "availability re-derived for the afternoon shift");
    }

    /// Route one arriving customer to the preferred open station.
    ///
    /// Stations are scanned by ascending id, keeping a running best. A
    /// candidate must be available to displace the best so far, and wins if
    /// the best is unavailable, if the candidate's queue is strictly
    /// shorter, or if the candidate is unoccupied while the best is not.
    /// When no station is available the customer is lost, not queued.
    pub fn route_arrival<R: RandomProcess + ?Sized>(
        &mut self,
        minute: u32,
        random: &mut R,
    ) -> RoutingOutcome {
        if self.stations.is_empty() {
            return RoutingOutcome::Dropped;
        }

        let mut preferred = 0;
        for idx in 1..self.stations.len() {
            let candidate = &self.stations[idx];
            let best = &self.stations[preferred];
            let candidate_wins = candidate.queue_length < best.queue_length
                || (best.occupied && !candidate.occupied);
            if candidate.available && (!best.available || candidate_wins) {
                preferred = idx;
            }
        }

        // The scan only ever replaces the best with an available candidate,
        // so an unavailable winner means the whole floor is closed.
        let station = &mut self.stations[preferred];
        if !station.available {
            debug!(minute, "arrival dropped, no station available");
            return RoutingOutcome::Dropped;
        }

        if station.queue_length > 0 || station.occupied {
            station.enqueue();
            RoutingOutcome::Queued(preferred)
        } else {
            station.begin_service(minute, random.service_duration());
            RoutingOutcome::ServiceStarted(preferred)
        }
    }

    /// Process service completions for this minute.
    ///
    /// Every station whose current service completes at `minute` counts one
    /// served customer, attributed to the shift in effect. A non-empty queue
    /// immediately feeds the next customer into service; completion keeps
    /// happening on stations that lost availability at the shift change.
    pub fn tick<R: RandomProcess + ?Sized>(
        &mut self,
        minute: u32,
        phase: ShiftPhase,
        random: &mut R,
    ) -> TickDeltas {
        let mut deltas = TickDeltas::default();
        for station in &mut self.stations {
            if !station.service_due(minute) {
                continue;
            }
            match phase {
                ShiftPhase::Morning => deltas.morning += 1,
                ShiftPhase::Afternoon => deltas.afternoon += 1,
            }
            station.complete_service(minute, || random.service_duration());
        }
        deltas
    }

    /// Number of stations in the pool.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of stations staffed in the current shift.
    pub fn available_count(&self) -> usize {
        self.stations.iter().filter(|s| s.available).count()
    }

    /// All station records, id-ascending.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Customers currently waiting across all queues.
    pub fn total_queued(&self) -> u32 {
        self.stations.iter().map(|s| s.queue_length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::random::RandomProcess;

    /// Deterministic process for exercising the pool in isolation.
    struct FixedDuration(u32);

    impl RandomProcess for FixedDuration {
        fn arrival_occurs(&mut self, _frequency: f32) -> bool {
            true
        }

        fn service_duration(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_set_up_marks_first_ids_available() {
        let mut pool = StationPool::new();
        pool.set_up(4, 2);

        let available: Vec<bool> = pool.stations().iter().map(|s| s.available).collect();
        assert_eq!(available, vec![true, true, false, false]);
        assert_eq!(pool.available_count(), 2);
    }

    #[test]
    fn test_set_up_resets_prior_state() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(2, 2);
        pool.route_arrival(0, &mut random);
        pool.route_arrival(0, &mut random);
        pool.route_arrival(0, &mut random);

        pool.set_up(2, 1);
        assert!(pool.stations().iter().all(|s| s.is_idle()));
        assert_eq!(pool.total_queued(), 0);
    }

    #[test]
    fn test_change_shift_marks_last_ids_available() {
        let mut pool = StationPool::new();
        pool.set_up(4, 2);
        pool.change_shift(3);

        let available: Vec<bool> = pool.stations().iter().map(|s| s.available).collect();
        assert_eq!(available, vec![false, true, true, true]);
    }

    #[test]
    fn test_change_shift_with_nonpositive_count_closes_floor() {
        let mut pool = StationPool::new();
        pool.set_up(3, 3);

        pool.change_shift(0);
        assert_eq!(pool.available_count(), 0);

        pool.set_up(3, 3);
        pool.change_shift(-2);
        assert_eq!(pool.available_count(), 0);
    }

    #[test]
    fn test_change_shift_with_full_count_opens_all() {
        let mut pool = StationPool::new();
        pool.set_up(3, 1);
        pool.change_shift(7);
        assert_eq!(pool.available_count(), 3);
    }

    #[test]
    fn test_change_shift_preserves_service_and_queue() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(2, 1);
        pool.route_arrival(10, &mut random);
        pool.route_arrival(11, &mut random);

        pool.change_shift(1);

        // Station 0 lost availability but is still mid-service with a queue.
        let station = &pool.stations()[0];
        assert!(!station.available);
        assert!(station.occupied);
        assert_eq!(station.queue_length, 1);
        assert_eq!(station.next_free_minute, 15);
    }

    #[test]
    fn test_route_arrival_prefers_idle_station() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(3, 3);

        assert_eq!(pool.route_arrival(0, &mut random), RoutingOutcome::ServiceStarted(0));
        // Station 0 is busy now, so the next customer goes to idle station 1.
        assert_eq!(pool.route_arrival(1, &mut random), RoutingOutcome::ServiceStarted(1));
        assert_eq!(pool.route_arrival(2, &mut random), RoutingOutcome::ServiceStarted(2));
        // Everyone busy with equal queues: the first station wins and queues.
        assert_eq!(pool.route_arrival(3, &mut random), RoutingOutcome::Queued(0));
    }

    #[test]
    fn test_route_arrival_prefers_shorter_queue() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(9);
        pool.set_up(2, 2);

        // Occupy both stations, then queue two customers onto station 0.
        pool.route_arrival(0, &mut random);
        pool.route_arrival(0, &mut random);
        pool.route_arrival(0, &mut random);
        assert_eq!(pool.stations()[0].queue_length, 1);

        // Station 1 has the shorter queue and takes the next customer.
        assert_eq!(pool.route_arrival(1, &mut random), RoutingOutcome::Queued(1));
    }

    #[test]
    fn test_route_arrival_skips_unavailable_stations() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(3, 1);
        pool.change_shift(1);

        // Only the last station is staffed now; station 0 must not be chosen
        // even though it is idle and first in scan order.
        assert_eq!(pool.route_arrival(0, &mut random), RoutingOutcome::ServiceStarted(2));
    }

    #[test]
    fn test_route_arrival_drops_when_floor_closed() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(3, 3);
        pool.change_shift(0);

        assert_eq!(pool.route_arrival(0, &mut random), RoutingOutcome::Dropped);
        // A dropped arrival leaves no trace in the pool.
        assert!(pool.stations().iter().all(|s| s.is_idle()));
    }

    #[test]
    fn test_tick_counts_completion_per_shift() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(1, 1);
        pool.route_arrival(0, &mut random);

        assert_eq!(pool.tick(4, ShiftPhase::Morning, &mut random), TickDeltas::default());

        let deltas = pool.tick(5, ShiftPhase::Morning, &mut random);
        assert_eq!(deltas, TickDeltas { morning: 1, afternoon: 0 });
        assert!(pool.stations()[0].is_idle());

        pool.route_arrival(6, &mut random);
        let deltas = pool.tick(11, ShiftPhase::Afternoon, &mut random);
        assert_eq!(deltas, TickDeltas { morning: 0, afternoon: 1 });
    }

    #[test]
    fn test_tick_feeds_queue_into_service() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(1, 1);
        pool.route_arrival(0, &mut random);
        pool.route_arrival(1, &mut random);
        pool.route_arrival(2, &mut random);
        assert_eq!(pool.stations()[0].queue_length, 2);

        pool.tick(5, ShiftPhase::Morning, &mut random);
        let station = &pool.stations()[0];
        assert!(station.occupied);
        assert_eq!(station.queue_length, 1);
        assert_eq!(station.next_free_minute, 10);
    }

    #[test]
    fn test_tick_serves_queue_on_unavailable_station() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(1, 1);
        pool.route_arrival(0, &mut random);
        pool.route_arrival(1, &mut random);
        pool.change_shift(0);

        // Off shift, but the queued customer still gets served.
        let deltas = pool.tick(5, ShiftPhase::Afternoon, &mut random);
        assert_eq!(deltas.total(), 1);
        assert!(pool.stations()[0].occupied);

        let deltas = pool.tick(10, ShiftPhase::Afternoon, &mut random);
        assert_eq!(deltas.total(), 1);
        assert!(pool.stations()[0].is_idle());
    }

    #[test]
    fn test_arrivals_alone_never_complete_service() {
        let mut pool = StationPool::new();
        let mut random = FixedDuration(5);
        pool.set_up(2, 2);

        let mut completions = 0;
        for minute in 0..4 {
            pool.route_arrival(minute, &mut random);
            completions += pool.tick(minute, ShiftPhase::Morning, &mut random).total();
        }
        // All services are still in flight; only tick can count them.
        assert_eq!(completions, 0);
    }
}
