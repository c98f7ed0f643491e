//! Vehicle arrival processes
//!
//! An arrival process is asked for one arrival at a time. The plaza schedules
//! the first arrival up front and asks for the next one every time an arrival
//! fires, so a Poisson stream never ends on its own; the run's time bound cuts
//! it off.

use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};
use std::collections::VecDeque;

use super::config::check_arrival_rate;
use super::error::{SimError, SimResult};
use super::event::EventKind;
use super::scheduler::EventScheduler;
use super::types::SECONDS_PER_HOUR;

/// Source of arrival times
pub trait ArrivalProcess {
    /// Time of the next arrival after `current_time`, or `None` once exhausted
    fn next_arrival(&mut self, current_time: f64, rng: &mut StdRng) -> Option<f64>;

    /// Draw the next arrival and put it on the scheduler.
    /// Returns the scheduled time, or `None` if the process is exhausted.
    fn schedule_next(
        &mut self,
        current_time: f64,
        scheduler: &mut EventScheduler,
        rng: &mut StdRng,
    ) -> SimResult<Option<f64>> {
        match self.next_arrival(current_time, rng) {
            Some(time) => {
                scheduler.schedule(time, EventKind::Arrival)?;
                Ok(Some(time))
            }
            None => Ok(None),
        }
    }
}

/// Memoryless arrivals with exponentially distributed gaps
#[derive(Debug, Clone)]
pub struct PoissonArrivals {
    vehicles_per_hour: f64,
    gap: Exp<f64>,
}

impl PoissonArrivals {
    pub fn new(vehicles_per_hour: f64) -> SimResult<Self> {
        check_arrival_rate(vehicles_per_hour)?;
        let gap = Exp::new(vehicles_per_hour / SECONDS_PER_HOUR)
            .map_err(|e| SimError::config("vehicles_per_hour", e.to_string()))?;
        Ok(Self {
            vehicles_per_hour,
            gap,
        })
    }

    pub fn vehicles_per_hour(&self) -> f64 {
        self.vehicles_per_hour
    }

    /// Mean gap between arrivals in seconds
    pub fn mean_gap(&self) -> f64 {
        SECONDS_PER_HOUR / self.vehicles_per_hour
    }
}

impl ArrivalProcess for PoissonArrivals {
    fn next_arrival(&mut self, current_time: f64, rng: &mut StdRng) -> Option<f64> {
        Some(current_time + self.gap.sample(rng))
    }
}

/// Arrivals at fixed absolute times
///
/// Times earlier than the time at which they are requested are clamped to
/// that time, so a script can never schedule into the past.
#[derive(Debug, Clone, Default)]
pub struct ScriptedArrivals {
    times: VecDeque<f64>,
}

impl ScriptedArrivals {
    pub fn new(times: impl IntoIterator<Item = f64>) -> SimResult<Self> {
        let times: VecDeque<f64> = times.into_iter().collect();
        if times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(SimError::config(
                "scripted_arrivals",
                "arrival times must be finite and non-negative",
            ));
        }
        if times.iter().zip(times.iter().skip(1)).any(|(a, b)| b < a) {
            return Err(SimError::config(
                "scripted_arrivals",
                "arrival times must be non-decreasing",
            ));
        }
        Ok(Self { times })
    }

    pub fn remaining(&self) -> usize {
        self.times.len()
    }
}

impl ArrivalProcess for ScriptedArrivals {
    fn next_arrival(&mut self, current_time: f64, _rng: &mut StdRng) -> Option<f64> {
        self.times.pop_front().map(|t| t.max(current_time))
    }
}
