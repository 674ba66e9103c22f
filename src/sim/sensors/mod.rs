//! Sensor models (C12): each exposes `measure(truth, dt) -> reading` with
//! configurable noise, and an explicit fault-mode enum the struct carries
//! directly rather than rebinding behaviour at runtime.

pub mod gps;
pub mod gyroscope;
pub mod magnetometer;
pub mod sun_sensor;

pub use gps::GpsSensor;
pub use gyroscope::Gyroscope;
pub use magnetometer::Magnetometer;
pub use sun_sensor::SunSensorArray;

/// Fault modes shared by every sensor in this module. Each sensor's
/// `measure` branches on this field explicitly; there is no method
/// rebinding or trait-object swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFaultMode {
    Nominal,
    Stuck,
    Offline,
    Degraded,
}
