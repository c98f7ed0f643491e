//! Vehicle generation
//!
//! A [`VehicleSource`] decides the attributes of each arriving vehicle. The
//! plaza assigns ids and arrival times; the source fills in everything else.

use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

use super::error::{SimError, SimResult};
use super::types::{
    PaymentMethod, VehicleClass, VehicleId, MAX_CRUISING_SPEED, MIN_CRUISING_SPEED,
};
use super::vehicle::Vehicle;

/// Produces the vehicle for each arrival
pub trait VehicleSource {
    fn next_vehicle(&mut self, id: VehicleId, arrival_time: f64, rng: &mut StdRng) -> Vehicle;
}

/// Random traffic mix: weighted class draw, per-class axle rule, uniform speed
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFleet;

impl VehicleSource for RandomFleet {
    fn next_vehicle(&mut self, id: VehicleId, arrival_time: f64, rng: &mut StdRng) -> Vehicle {
        let class = VehicleClass::sample(rng);
        let axle_count = class.sample_axles(rng);
        let cruising_speed = rng.random_range(MIN_CRUISING_SPEED..=MAX_CRUISING_SPEED);
        let payment_method = PaymentMethod::sample(rng);
        Vehicle::new(id, class, axle_count, cruising_speed, payment_method, arrival_time)
    }
}

/// A fixed sequence of vehicle classes and axle counts
///
/// Once the script runs out every further vehicle is a two-axle car.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFleet {
    vehicles: VecDeque<(VehicleClass, u32)>,
}

impl ScriptedFleet {
    /// Build a script, rejecting axle counts the class cannot have
    pub fn new(vehicles: impl IntoIterator<Item = (VehicleClass, u32)>) -> SimResult<Self> {
        let vehicles: VecDeque<_> = vehicles.into_iter().collect();
        if let Some((class, axles)) = vehicles
            .iter()
            .find(|(class, axles)| !class.allows_axles(*axles))
        {
            return Err(SimError::config(
                "scripted_fleet",
                format!("{} cannot have {} axles", class.as_str(), axles),
            ));
        }
        Ok(Self { vehicles })
    }

    /// One vehicle per axle count, using the first class whose rule allows it
    pub fn with_axles(axles: impl IntoIterator<Item = u32>) -> SimResult<Self> {
        Self::new(axles.into_iter().map(|a| {
            let class = if VehicleClass::Car.allows_axles(a) {
                VehicleClass::Car
            } else if VehicleClass::Bus.allows_axles(a) {
                VehicleClass::Bus
            } else {
                VehicleClass::Truck
            };
            (class, a)
        }))
    }
}

impl VehicleSource for ScriptedFleet {
    fn next_vehicle(&mut self, id: VehicleId, arrival_time: f64, _rng: &mut StdRng) -> Vehicle {
        let (class, axle_count) = self
            .vehicles
            .pop_front()
            .unwrap_or((VehicleClass::Car, 2));
        Vehicle::new(
            id,
            class,
            axle_count,
            MIN_CRUISING_SPEED,
            PaymentMethod::ElectronicTag,
            arrival_time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_fleet_respects_class_rules() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut fleet = RandomFleet;
        for i in 0..1000 {
            let vehicle = fleet.next_vehicle(VehicleId(i), i as f64, &mut rng);
            assert!(vehicle.class.allows_axles(vehicle.axle_count));
            assert!((40.0..=80.0).contains(&vehicle.cruising_speed));
            assert_eq!(vehicle.departure_time, None);
            assert_eq!(vehicle.arrival_time, i as f64);
        }
    }

    #[test]
    fn test_scripted_fleet_replays_in_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut fleet =
            ScriptedFleet::new([(VehicleClass::Truck, 5), (VehicleClass::Bus, 3)]).unwrap();

        let first = fleet.next_vehicle(VehicleId(1), 0.0, &mut rng);
        let second = fleet.next_vehicle(VehicleId(2), 1.0, &mut rng);
        let third = fleet.next_vehicle(VehicleId(3), 2.0, &mut rng);

        assert_eq!((first.class, first.axle_count), (VehicleClass::Truck, 5));
        assert_eq!((second.class, second.axle_count), (VehicleClass::Bus, 3));
        assert_eq!((third.class, third.axle_count), (VehicleClass::Car, 2));
    }

    #[test]
    fn test_scripted_fleet_rejects_impossible_axles() {
        assert!(ScriptedFleet::new([(VehicleClass::Car, 4)]).is_err());
        assert!(ScriptedFleet::with_axles([7]).is_err());
        assert!(ScriptedFleet::with_axles([2, 3, 6]).is_ok());
    }
}
