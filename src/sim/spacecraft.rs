//! The `Spacecraft` aggregate (§3): orbital state, attitude state, and
//! the actuator commands/momentum the orchestrator mutates each tick.
//! Owns no borrowed references; callbacks only ever see it for the
//! duration of a single tick.

use crate::math::{Mat3, Vec3};
use crate::sim::attitude::AttitudeState;
use crate::sim::orbital::OrbitalState;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SpacecraftPhysicalParams {
    pub mass_kg: f64,
    pub inertia: Mat3,
    pub drag_cross_section_m2: f64,
    pub drag_coefficient: f64,
}

impl Default for SpacecraftPhysicalParams {
    fn default() -> Self {
        SpacecraftPhysicalParams {
            mass_kg: 4.0,
            inertia: Mat3::diagonal(0.02, 0.018, 0.015),
            drag_cross_section_m2: 0.03,
            drag_coefficient: 2.2,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Spacecraft {
    pub orbital: OrbitalState,
    pub attitude: AttitudeState,
    pub params: SpacecraftPhysicalParams,
    /// Dipole moment last delivered by the magnetorquer set (body frame).
    pub magnetorquer_dipole_moment: Vec3,
    /// Net torque last delivered by the reaction wheel array (body frame).
    pub reaction_wheel_torque: Vec3,
    /// Disturbance torque aggregated this tick (solar pressure, residual
    /// dipole interaction, etc.), added on top of modelled torques.
    pub disturbance_torque: Vec3,
}

impl Spacecraft {
    pub fn new(orbital: OrbitalState, attitude: AttitudeState, params: SpacecraftPhysicalParams) -> Self {
        Spacecraft {
            orbital,
            attitude,
            params,
            magnetorquer_dipole_moment: Vec3::ZERO,
            reaction_wheel_torque: Vec3::ZERO,
            disturbance_torque: Vec3::ZERO,
        }
    }

    /// Nadir-pointing unit vector in body frame, used by the
    /// gravity-gradient torque model.
    pub fn nadir_body(&self) -> Vec3 {
        let nadir_inertial = (self.orbital.position_km * -1.0).normalized();
        self.attitude.orientation.rotate_inertial_to_body(&nadir_inertial)
    }
}
