//! Observation hooks for the event loop
//!
//! The plaza reports what happens through a [`PlazaObserver`] instead of
//! printing. Every hook has an empty default so observers only implement what
//! they care about.

use log::debug;

use super::types::BoothId;
use super::vehicle::Vehicle;

pub trait PlazaObserver {
    /// A vehicle joined `booth`; `queue_length` includes the new vehicle
    fn vehicle_arrived(
        &mut self,
        _time: f64,
        _vehicle: &Vehicle,
        _booth: BoothId,
        _queue_length: usize,
    ) {
    }

    /// A vehicle reached the window and will leave at `finish_time`
    fn service_started(
        &mut self,
        _time: f64,
        _vehicle: &Vehicle,
        _booth: BoothId,
        _finish_time: f64,
    ) {
    }

    /// A vehicle left; `queue_length` is how many are still waiting at `booth`
    fn service_finished(
        &mut self,
        _time: f64,
        _vehicle: &Vehicle,
        _booth: BoothId,
        _queue_length: usize,
    ) {
    }
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PlazaObserver for NoopObserver {}

/// Writes one debug log line per event
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PlazaObserver for LogObserver {
    fn vehicle_arrived(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        queue_length: usize,
    ) {
        debug!(
            "TIME: {:.2}s - Vehicle {} ({}, {} axles) ARRIVED, routed to booth {} (queue: {})",
            time,
            vehicle.id.0,
            vehicle.class.as_str(),
            vehicle.axle_count,
            booth.0,
            queue_length
        );
    }

    fn service_started(&mut self, time: f64, vehicle: &Vehicle, booth: BoothId, finish_time: f64) {
        debug!(
            "TIME: {:.2}s - Vehicle {} STARTED at booth {}, done at {:.2}s",
            time, vehicle.id.0, booth.0, finish_time
        );
    }

    fn service_finished(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        _queue_length: usize,
    ) {
        debug!(
            "TIME: {:.2}s - Vehicle {} FINISHED at booth {}. Wait time: {:.2}s",
            time,
            vehicle.id.0,
            booth.0,
            time - vehicle.arrival_time
        );
    }
}

impl<T: PlazaObserver + ?Sized> PlazaObserver for &mut T {
    fn vehicle_arrived(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        queue_length: usize,
    ) {
        (**self).vehicle_arrived(time, vehicle, booth, queue_length)
    }

    fn service_started(&mut self, time: f64, vehicle: &Vehicle, booth: BoothId, finish_time: f64) {
        (**self).service_started(time, vehicle, booth, finish_time)
    }

    fn service_finished(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        queue_length: usize,
    ) {
        (**self).service_finished(time, vehicle, booth, queue_length)
    }
}

/// Fan out to two observers, first then second
impl<A: PlazaObserver, B: PlazaObserver> PlazaObserver for (A, B) {
    fn vehicle_arrived(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        queue_length: usize,
    ) {
        self.0.vehicle_arrived(time, vehicle, booth, queue_length);
        self.1.vehicle_arrived(time, vehicle, booth, queue_length);
    }

    fn service_started(&mut self, time: f64, vehicle: &Vehicle, booth: BoothId, finish_time: f64) {
        self.0.service_started(time, vehicle, booth, finish_time);
        self.1.service_started(time, vehicle, booth, finish_time);
    }

    fn service_finished(
        &mut self,
        time: f64,
        vehicle: &Vehicle,
        booth: BoothId,
        queue_length: usize,
    ) {
        self.0.service_finished(time, vehicle, booth, queue_length);
        self.1.service_finished(time, vehicle, booth, queue_length);
    }
}
