//! Toll plaza discrete-event simulation
//!
//! This module contains the simulation engine: the event scheduler, arrival
//! processes, vehicle generation, booths, routing and the plaza that drives
//! them. It performs no I/O apart from the optional transaction log observer.

mod arrival;
mod booth;
mod config;
mod error;
mod event;
mod fleet;
mod observer;
mod plaza;
mod routing;
mod scheduler;
mod stats;
mod transaction_log;
mod types;
mod vehicle;

// Re-export public types for external use
pub use arrival::{ArrivalProcess, PoissonArrivals, ScriptedArrivals};
pub use booth::TollBooth;
pub use config::{
    PlazaConfig, DEFAULT_APPROACH_DISTANCE_KM, DEFAULT_BOOTH_COUNT, DEFAULT_EPOCH_SECONDS,
    DEFAULT_FEE_PER_AXLE, DEFAULT_SECONDS_PER_AXLE, DEFAULT_VEHICLES_PER_HOUR,
};
pub use error::{SimError, SimResult};
pub use event::{Event, EventKind};
pub use fleet::{RandomFleet, ScriptedFleet, VehicleSource};
pub use observer::{LogObserver, NoopObserver, PlazaObserver};
pub use plaza::TollPlaza;
pub use routing::{RoutingPolicy, ShortestQueue};
pub use scheduler::EventScheduler;
pub use stats::{PlazaStats, RunSummary, Termination};
pub use transaction_log::{TransactionLog, TransactionRecord, TRANSACTION_EVENT};
pub use types::{
    BoothId, PaymentMethod, VehicleClass, VehicleId, MAX_CRUISING_SPEED, MIN_CRUISING_SPEED,
    SECONDS_PER_HOUR,
};
pub use vehicle::Vehicle;
