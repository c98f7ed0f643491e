//! Vehicles passing through the plaza

use super::types::{PaymentMethod, VehicleClass, VehicleId};

/// A vehicle in the toll plaza simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub class: VehicleClass,
    pub axle_count: u32,
    /// Cruising speed in km/h. Carried for future pricing and routing layers;
    /// nothing in the engine reads it.
    pub cruising_speed: f64,
    pub payment_method: PaymentMethod,
    /// Simulation time the vehicle reached the plaza
    pub arrival_time: f64,
    /// Simulation time the vehicle left its booth, unset until service completes
    pub departure_time: Option<f64>,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        class: VehicleClass,
        axle_count: u32,
        cruising_speed: f64,
        payment_method: PaymentMethod,
        arrival_time: f64,
    ) -> Self {
        Self {
            id,
            class,
            axle_count,
            cruising_speed,
            payment_method,
            arrival_time,
            departure_time: None,
        }
    }

    /// Mark the vehicle as departed and return its time in the system
    pub fn depart(&mut self, time: f64) -> f64 {
        self.departure_time = Some(time);
        time - self.arrival_time
    }

    /// Time between arrival and departure, once departed
    pub fn wait_time(&self) -> Option<f64> {
        self.departure_time.map(|t| t - self.arrival_time)
    }

    /// Registration plate derived from the vehicle id
    pub fn license_plate(&self) -> String {
        format!("TP-{:06}", self.id.0)
    }
}
