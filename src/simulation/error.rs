//! Error types for the toll plaza simulation

use thiserror::Error;

use super::types::BoothId;

/// Failures raised by the simulation engine.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// The plaza or run was configured with values the engine cannot use.
    #[error("Invalid configuration: {field} {reason}")]
    Configuration {
        field: &'static str,
        reason: String,
    },

    /// An event was scheduled before the current simulation time.
    #[error("Event scheduled at {time:.3}s but the clock is already at {now:.3}s")]
    OrderingViolation { time: f64, now: f64 },

    /// The routing policy picked no booth, or one the plaza does not have.
    #[error("Routing policy chose {chosen:?} but the plaza has {booth_count} booths")]
    InvalidRoute {
        chosen: Option<BoothId>,
        booth_count: usize,
    },
}

impl SimError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

/// Library result type
pub type SimResult<T> = std::result::Result<T, SimError>;
