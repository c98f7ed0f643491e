//! Time-ordered event queue that owns the simulation clock

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::error::{SimError, SimResult};
use super::event::{Event, EventKind};

/// Min-heap of pending events plus the current simulation time
#[derive(Debug, Default)]
pub struct EventScheduler {
    queue: BinaryHeap<Reverse<Event>>,
    now: f64,
    next_sequence: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an event. Scheduling into the past is an ordering violation.
    pub fn schedule(&mut self, time: f64, kind: EventKind) -> SimResult<Event> {
        if !time.is_finite() || time < self.now {
            return Err(SimError::OrderingViolation {
                time,
                now: self.now,
            });
        }

        let event = Event::new(time, self.next_sequence, kind);
        self.next_sequence += 1;
        self.queue.push(Reverse(event));
        Ok(event)
    }

    /// Remove the earliest event and advance the clock to its time
    pub fn pop_next(&mut self) -> Option<Event> {
        let Reverse(event) = self.queue.pop()?;
        self.now = event.time();
        Some(event)
    }

    /// Time of the earliest pending event
    pub fn peek_time(&self) -> Option<f64> {
        self.queue.peek().map(|Reverse(event)| event.time())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::BoothId;

    #[test]
    fn test_pops_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(5.0, EventKind::Arrival).unwrap();
        scheduler.schedule(1.0, EventKind::Arrival).unwrap();
        scheduler.schedule(3.0, EventKind::Arrival).unwrap();

        let times: Vec<f64> = std::iter::from_fn(|| scheduler.pop_next())
            .map(|e| e.time())
            .collect();
        assert_eq!(times, vec![1.0, 3.0, 5.0]);
        assert_eq!(scheduler.now(), 5.0);
    }

    #[test]
    fn test_equal_times_pop_fifo() {
        let mut scheduler = EventScheduler::new();
        scheduler
            .schedule(2.0, EventKind::FinishService(BoothId(1)))
            .unwrap();
        scheduler.schedule(2.0, EventKind::Arrival).unwrap();
        scheduler
            .schedule(2.0, EventKind::StartService(BoothId(0)))
            .unwrap();

        let kinds: Vec<EventKind> = std::iter::from_fn(|| scheduler.pop_next())
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::FinishService(BoothId(1)),
                EventKind::Arrival,
                EventKind::StartService(BoothId(0)),
            ]
        );
    }

    #[test]
    fn test_rejects_events_in_the_past() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(10.0, EventKind::Arrival).unwrap();
        scheduler.pop_next();

        let result = scheduler.schedule(9.5, EventKind::Arrival);
        assert_eq!(
            result.unwrap_err(),
            SimError::OrderingViolation {
                time: 9.5,
                now: 10.0
            }
        );
        // Same instant is fine
        assert!(scheduler.schedule(10.0, EventKind::Arrival).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_times() {
        let mut scheduler = EventScheduler::new();
        assert!(scheduler.schedule(f64::NAN, EventKind::Arrival).is_err());
        assert!(scheduler.schedule(f64::INFINITY, EventKind::Arrival).is_err());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = EventScheduler::new();
        assert!(scheduler.pop_next().is_none());
        assert_eq!(scheduler.peek_time(), None);
        assert_eq!(scheduler.now(), 0.0);
    }
}
