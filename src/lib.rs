//! Toll Plaza Simulation Library
//!
//! A discrete-event model of vehicles queueing at a multi-booth toll plaza,
//! intended as a testbed for pricing and booth allocation strategies.

pub mod simulation;
