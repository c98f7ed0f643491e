//! Routing of arriving vehicles to booths

use super::booth::TollBooth;
use super::types::BoothId;

/// Chooses the booth an arriving vehicle joins
pub trait RoutingPolicy {
    /// Returns None only when there are no booths
    fn select_booth(&self, booths: &[TollBooth]) -> Option<BoothId>;
}

/// Join the shortest queue, lowest booth index on ties
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestQueue;

impl RoutingPolicy for ShortestQueue {
    fn select_booth(&self, booths: &[TollBooth]) -> Option<BoothId> {
        // min_by_key keeps the first of equal minima
        booths
            .iter()
            .enumerate()
            .min_by_key(|(_, booth)| booth.queue_len())
            .map(|(index, _)| BoothId(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::{PaymentMethod, VehicleClass, VehicleId};
    use crate::simulation::vehicle::Vehicle;

    fn booths_with_queues(lengths: &[usize]) -> Vec<TollBooth> {
        let mut next_id = 0;
        lengths
            .iter()
            .enumerate()
            .map(|(index, &len)| {
                let mut booth = TollBooth::new(BoothId(index));
                for _ in 0..len {
                    next_id += 1;
                    booth.enqueue(Vehicle::new(
                        VehicleId(next_id),
                        VehicleClass::Car,
                        2,
                        50.0,
                        PaymentMethod::Card,
                        0.0,
                    ));
                }
                booth
            })
            .collect()
    }

    #[test]
    fn test_picks_shortest_queue() {
        let booths = booths_with_queues(&[3, 1, 2]);
        assert_eq!(ShortestQueue.select_booth(&booths), Some(BoothId(1)));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let booths = booths_with_queues(&[2, 0, 1, 0]);
        assert_eq!(ShortestQueue.select_booth(&booths), Some(BoothId(1)));

        let booths = booths_with_queues(&[0, 0, 0]);
        for _ in 0..10 {
            assert_eq!(ShortestQueue.select_booth(&booths), Some(BoothId(0)));
        }
    }

    #[test]
    fn test_busy_vehicle_does_not_count_as_queued() {
        let mut booths = booths_with_queues(&[1, 1]);
        booths[0].start_service();
        assert_eq!(ShortestQueue.select_booth(&booths), Some(BoothId(0)));
    }

    #[test]
    fn test_no_booths() {
        assert_eq!(ShortestQueue.select_booth(&[]), None);
    }
}
