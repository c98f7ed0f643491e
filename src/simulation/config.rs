//! Plaza configuration
//!
//! Everything the engine needs to know up front. Passed by value into
//! [`TollPlaza::new`](super::TollPlaza::new); there is no process-wide state.

use chrono::{DateTime, Utc};

use super::error::{SimError, SimResult};
use super::types::SECONDS_PER_HOUR;

/// Default number of booths
pub const DEFAULT_BOOTH_COUNT: usize = 3;

/// Default mean arrival rate
pub const DEFAULT_VEHICLES_PER_HOUR: f64 = 200.0;

/// Default service time charged per axle
pub const DEFAULT_SECONDS_PER_AXLE: f64 = 2.0;

/// Default flat tariff per axle used by the transaction log
pub const DEFAULT_FEE_PER_AXLE: f64 = 1.50;

/// Default distance reported for each transaction, in km
pub const DEFAULT_APPROACH_DISTANCE_KM: f64 = 1.0;

/// 2025-01-01T00:00:00Z, the instant simulation time zero maps to by default
pub const DEFAULT_EPOCH_SECONDS: i64 = 1_735_689_600;

/// Configuration for a toll plaza simulation
#[derive(Debug, Clone, PartialEq)]
pub struct PlazaConfig {
    /// Number of booths, each with its own queue
    pub booth_count: usize,

    /// Mean arrival rate of the Poisson arrival process
    pub vehicles_per_hour: f64,

    /// Service time per axle, in seconds
    pub seconds_per_axle: f64,

    /// Plaza identifier written into transaction records
    pub plaza_id: u32,

    /// Human readable plaza name written into transaction records
    pub plaza_name: String,

    /// Flat tariff per axle written into transaction records
    pub fee_per_axle: f64,

    /// Distance reported per transaction, in km
    pub approach_distance_km: f64,

    /// Wall clock instant that simulation time zero maps to
    pub epoch: DateTime<Utc>,
}

impl Default for PlazaConfig {
    fn default() -> Self {
        Self {
            booth_count: DEFAULT_BOOTH_COUNT,
            vehicles_per_hour: DEFAULT_VEHICLES_PER_HOUR,
            seconds_per_axle: DEFAULT_SECONDS_PER_AXLE,
            plaza_id: 1,
            plaza_name: "Main Plaza".to_string(),
            fee_per_axle: DEFAULT_FEE_PER_AXLE,
            approach_distance_km: DEFAULT_APPROACH_DISTANCE_KM,
            epoch: DateTime::from_timestamp(DEFAULT_EPOCH_SECONDS, 0).unwrap_or_default(),
        }
    }
}

/// Exponential draws stay below this multiple of their mean
const MAX_GAP_TO_MEAN: f64 = 1.0e3;

/// An arrival rate is usable when it is positive and its gaps stay finite
pub(crate) fn check_arrival_rate(vehicles_per_hour: f64) -> SimResult<()> {
    let mean_gap = SECONDS_PER_HOUR / vehicles_per_hour;
    if !vehicles_per_hour.is_finite()
        || vehicles_per_hour <= 0.0
        || !(mean_gap * MAX_GAP_TO_MEAN).is_finite()
    {
        return Err(SimError::config(
            "vehicles_per_hour",
            format!(
                "must be a positive number with a finite mean gap, got {}",
                vehicles_per_hour
            ),
        ));
    }
    Ok(())
}

impl PlazaConfig {
    pub fn new(booth_count: usize, vehicles_per_hour: f64) -> Self {
        Self {
            booth_count,
            vehicles_per_hour,
            ..Self::default()
        }
    }

    /// Check that the configuration can drive a simulation
    pub fn validate(&self) -> SimResult<()> {
        if self.booth_count == 0 {
            return Err(SimError::config("booth_count", "must be greater than zero"));
        }
        check_arrival_rate(self.vehicles_per_hour)?;
        if !self.seconds_per_axle.is_finite() || self.seconds_per_axle <= 0.0 {
            return Err(SimError::config(
                "seconds_per_axle",
                format!("must be a positive number, got {}", self.seconds_per_axle),
            ));
        }
        if !self.fee_per_axle.is_finite() || self.fee_per_axle < 0.0 {
            return Err(SimError::config(
                "fee_per_axle",
                format!("must not be negative, got {}", self.fee_per_axle),
            ));
        }
        if !self.approach_distance_km.is_finite() || self.approach_distance_km < 0.0 {
            return Err(SimError::config(
                "approach_distance_km",
                format!("must not be negative, got {}", self.approach_distance_km),
            ));
        }
        Ok(())
    }

    /// Service time for a vehicle with the given number of axles
    pub fn service_duration(&self, axle_count: u32) -> f64 {
        axle_count as f64 * self.seconds_per_axle
    }
}
