//! # Ground Link
//!
//! A CCSDS/PUS ground-segment packet codec paired with a deterministic
//! CubeSat flight-software simulation core: orbital and attitude dynamics,
//! environment models, sensors and actuators, and a fixed-step simulator
//! orchestrator, all driven through the same command packets a real
//! ground station would send.
//!
//! ## Architecture
//!
//! - [`codec`] - CCSDS primary headers, PUS secondary headers, CRC-16
//!   framing, the streaming decoder, and the high-level command builder
//! - [`sim`] - orbital/attitude dynamics, environment models, sensors,
//!   actuators, and the fixed-step simulator orchestrator
//! - [`scheduler`] - time-tagged and conditional command scheduling
//! - [`math`] - vectors, matrices, and quaternions used throughout `sim`
//! - [`rng`] - the deterministic PRNG behind sensor noise and scenario seeding
//! - [`error`] - the crate's error taxonomy
//!
//! ## Quick start
//!
//! ```rust
//! use cubesat_groundlink::codec::{CommandBuilder, TcPacketConfig};
//!
//! let mut commands = CommandBuilder::new(TcPacketConfig::default());
//! let ping = commands.ping().unwrap();
//! assert!(!ping.is_empty());
//! ```

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

pub mod codec;
pub mod error;
pub mod math;
pub mod rng;
pub mod scheduler;
pub mod sim;

pub use error::{CodecError, SchedulerError, SimError};
pub use scheduler::CommandScheduler;
