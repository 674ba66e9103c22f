//! Deterministic CubeSat flight-software simulation core: orbital and
//! attitude dynamics, environment models, sensors and actuators, and the
//! fixed-step orchestrator that ties them together, plus a handful of
//! named scenarios built on top of it.

pub mod actuators;
pub mod attitude;
pub mod config;
pub mod environment;
pub mod integrators;
pub mod orbital;
pub mod scenarios;
pub mod sensors;
pub mod simulator;
pub mod spacecraft;
pub mod time;

pub use config::SimulationConfig;
pub use simulator::{ActuatorCommand, SimulationState, Simulator};
pub use spacecraft::Spacecraft;
