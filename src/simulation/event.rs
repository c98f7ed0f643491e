//! Simulation events
//!
//! Every state change in the plaza happens in response to exactly one of these.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;

use super::types::BoothId;

/// What an event does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A new vehicle reaches the plaza
    Arrival,
    /// The booth takes the head of its queue into service
    StartService(BoothId),
    /// The booth releases the vehicle it is serving
    FinishService(BoothId),
}

impl EventKind {
    /// The booth this event targets, if any
    pub fn booth_id(&self) -> Option<BoothId> {
        match self {
            EventKind::Arrival => None,
            EventKind::StartService(booth) | EventKind::FinishService(booth) => Some(*booth),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Arrival => "ARRIVAL",
            EventKind::StartService(_) => "START_SERVICE",
            EventKind::FinishService(_) => "FINISH_SERVICE",
        }
    }
}

/// A scheduled event
///
/// Events are totally ordered by `(time, sequence)`. The sequence number is
/// handed out by the scheduler in insertion order, so events sharing a
/// timestamp fire first-in-first-out.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    time: OrderedFloat<f64>,
    sequence: u64,
    pub kind: EventKind,
}

impl Event {
    pub(crate) fn new(time: f64, sequence: u64, kind: EventKind) -> Self {
        Self {
            time: OrderedFloat(time),
            sequence,
            kind,
        }
    }

    /// Scheduled time in simulation seconds
    pub fn time(&self) -> f64 {
        self.time.into_inner()
    }

    /// Insertion order among all events of the run
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earlier_time_orders_first() {
        let early = Event::new(1.0, 5, EventKind::Arrival);
        let late = Event::new(2.0, 0, EventKind::FinishService(BoothId(0)));
        assert!(early < late);
    }

    #[test]
    fn test_equal_time_orders_by_insertion() {
        let first = Event::new(3.0, 1, EventKind::FinishService(BoothId(2)));
        let second = Event::new(3.0, 2, EventKind::Arrival);
        assert!(first < second);
    }

    #[test]
    fn test_booth_payload() {
        assert_eq!(EventKind::Arrival.booth_id(), None);
        assert_eq!(
            EventKind::StartService(BoothId(4)).booth_id(),
            Some(BoothId(4))
        );
    }
}
