//! Core types for the toll plaza simulation
//!
//! Identifiers, vehicle classes and the constants that describe them.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

/// A wrapper type for vehicle IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

/// A wrapper type for booth IDs
/// This is also the booth's index in the plaza's booth pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoothId(pub usize);

/// Class of vehicle arriving at the plaza
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleClass {
    /// Passenger car, always two axles
    Car,
    /// Bus with two or three axles
    Bus,
    /// Goods vehicle with three to six axles
    Truck,
}

impl VehicleClass {
    /// All classes with their arrival weights
    pub const WEIGHTED: [(VehicleClass, f64); 3] = [
        (VehicleClass::Car, 0.60),
        (VehicleClass::Bus, 0.15),
        (VehicleClass::Truck, 0.25),
    ];

    /// Inclusive range of axle counts for this class
    pub fn axle_range(self) -> (u32, u32) {
        match self {
            VehicleClass::Car => (2, 2),
            VehicleClass::Bus => (2, 3),
            VehicleClass::Truck => (3, 6),
        }
    }

    /// Draw an axle count uniformly from this class's range
    pub fn sample_axles(self, rng: &mut StdRng) -> u32 {
        let (low, high) = self.axle_range();
        rng.random_range(low..=high)
    }

    pub fn allows_axles(self, axle_count: u32) -> bool {
        let (low, high) = self.axle_range();
        (low..=high).contains(&axle_count)
    }

    /// Draw a class from the weighted class mix
    pub fn sample(rng: &mut StdRng) -> Self {
        sample_weighted(&Self::WEIGHTED, rng)
    }

    /// Display name used in transaction records
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Car => "Car",
            VehicleClass::Bus => "Bus",
            VehicleClass::Truck => "Truck",
        }
    }
}

/// How a vehicle pays its toll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    Card,
    ElectronicTag,
}

impl PaymentMethod {
    pub const WEIGHTED: [(PaymentMethod, f64); 3] = [
        (PaymentMethod::Cash, 0.30),
        (PaymentMethod::Card, 0.30),
        (PaymentMethod::ElectronicTag, 0.40),
    ];

    pub fn sample(rng: &mut StdRng) -> Self {
        sample_weighted(&Self::WEIGHTED, rng)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::ElectronicTag => "Electronic Tag",
        }
    }
}

/// Pick one entry of a weighted table. Weights need not sum to one.
fn sample_weighted<T: Copy>(table: &[(T, f64)], rng: &mut StdRng) -> T {
    // Tables are non-empty constants with positive weights, so the draw
    // cannot fail; the first entry stands in if one ever does
    table
        .choose_weighted(rng, |(_, weight)| *weight)
        .map_or(table[0].0, |(item, _)| *item)
}

/// Lower bound of the cruising speed draw, in km/h
pub const MIN_CRUISING_SPEED: f64 = 40.0;

/// Upper bound of the cruising speed draw, in km/h
pub const MAX_CRUISING_SPEED: f64 = 80.0;

/// Seconds per hour, used to turn an hourly rate into a per-second rate
pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_axle_ranges_follow_class_rules() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            assert_eq!(VehicleClass::Car.sample_axles(&mut rng), 2);
            let bus = VehicleClass::Bus.sample_axles(&mut rng);
            assert!(bus == 2 || bus == 3);
            let truck = VehicleClass::Truck.sample_axles(&mut rng);
            assert!((3..=6).contains(&truck));
        }
    }

    #[test]
    fn test_class_mix_roughly_matches_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 20_000;
        let cars = (0..draws)
            .filter(|_| VehicleClass::sample(&mut rng) == VehicleClass::Car)
            .count();
        let share = cars as f64 / draws as f64;
        assert!((share - 0.60).abs() < 0.03, "car share was {}", share);
    }

    #[test]
    fn test_weighted_draw_skips_zero_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = [(1u8, 0.0), (2u8, 2.5), (3u8, 0.0)];
        for _ in 0..1000 {
            assert_eq!(sample_weighted(&table, &mut rng), 2);
        }
    }

    #[test]
    fn test_payment_mix_roughly_matches_weights() {
        let mut rng = StdRng::seed_from_u64(8);
        let draws = 20_000;
        let tags = (0..draws)
            .filter(|_| PaymentMethod::sample(&mut rng) == PaymentMethod::ElectronicTag)
            .count();
        let share = tags as f64 / draws as f64;
        assert!((share - 0.40).abs() < 0.03, "tag share was {}", share);
    }
}
