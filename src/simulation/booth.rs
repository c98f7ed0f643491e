//! Toll booth logic
//!
//! A booth owns its queue and the vehicle it is serving. It knows nothing
//! about time; the plaza tells it when to start and finish.

use std::collections::VecDeque;

use super::types::BoothId;
use super::vehicle::Vehicle;

/// A single toll booth with its own FIFO queue
#[derive(Debug, Clone)]
pub struct TollBooth {
    pub id: BoothId,
    queue: VecDeque<Vehicle>,
    /// The vehicle currently at the window. Some exactly while the booth is busy.
    in_service: Option<Vehicle>,
    /// Number of vehicles this booth has finished serving
    served: usize,
}

impl TollBooth {
    pub fn new(id: BoothId) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
            in_service: None,
            served: 0,
        }
    }

    /// Add a vehicle to the back of the queue
    pub fn enqueue(&mut self, vehicle: Vehicle) {
        self.queue.push_back(vehicle);
    }

    /// Number of vehicles waiting, not counting the one in service
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_busy(&self) -> bool {
        self.in_service.is_some()
    }

    pub fn in_service(&self) -> Option<&Vehicle> {
        self.in_service.as_ref()
    }

    pub fn queued(&self) -> impl Iterator<Item = &Vehicle> {
        self.queue.iter()
    }

    pub fn served(&self) -> usize {
        self.served
    }

    /// Move the head of the queue into service
    /// Returns None if the booth is already busy or nobody is waiting
    pub fn start_service(&mut self) -> Option<&Vehicle> {
        if self.is_busy() {
            return None;
        }
        let vehicle = self.queue.pop_front()?;
        self.in_service = Some(vehicle);
        self.in_service.as_ref()
    }

    /// Release the vehicle in service, stamping its departure time
    pub fn finish_service(&mut self, time: f64) -> Option<Vehicle> {
        let mut vehicle = self.in_service.take()?;
        vehicle.depart(time);
        self.served += 1;
        Some(vehicle)
    }
}
