//! Three-axis magnetorquer set (C13): commanded dipole moment tracked
//! with first-order lag `alpha = 1 - exp(-dt/tau)`, faultable per the
//! shared actuator fault-mode enum.

use crate::math::Vec3;
use crate::sim::actuators::ActuatorFaultMode;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct MagnetorquerConfig {
    pub time_constant_s: f64,
    pub max_dipole_moment_a_m2: f64,
}

impl Default for MagnetorquerConfig {
    fn default() -> Self {
        MagnetorquerConfig { time_constant_s: 0.5, max_dipole_moment_a_m2: 0.2 }
    }
}

pub struct MagnetorquerSet {
    config: MagnetorquerConfig,
    fault_mode: ActuatorFaultMode,
    commanded_dipole_moment: Vec3,
    actual_dipole_moment: Vec3,
}

impl MagnetorquerSet {
    pub fn new(config: MagnetorquerConfig) -> Self {
        MagnetorquerSet {
            config,
            fault_mode: ActuatorFaultMode::Nominal,
            commanded_dipole_moment: Vec3::ZERO,
            actual_dipole_moment: Vec3::ZERO,
        }
    }

    pub fn inject_fault(&mut self, mode: ActuatorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = ActuatorFaultMode::Nominal;
    }

    pub fn command(&mut self, dipole_moment: Vec3) {
        let magnitude = dipole_moment.norm();
        self.commanded_dipole_moment = if magnitude > self.config.max_dipole_moment_a_m2 && magnitude > 1e-15 {
            dipole_moment * (self.config.max_dipole_moment_a_m2 / magnitude)
        } else {
            dipole_moment
        };
    }

    /// Advances the actual dipole moment toward the commanded value with
    /// first-order lag, and returns the actuator's effective output for
    /// this tick, accounting for the fault mode.
    pub fn update(&mut self, dt: f64) -> Vec3 {
        match self.fault_mode {
            ActuatorFaultMode::StuckOff => {
                self.actual_dipole_moment = Vec3::ZERO;
                return Vec3::ZERO;
            }
            ActuatorFaultMode::StuckOn => return self.actual_dipole_moment,
            ActuatorFaultMode::Nominal | ActuatorFaultMode::Degraded | ActuatorFaultMode::Noisy => {}
        }

        let alpha = 1.0 - (-dt / self.config.time_constant_s).exp();
        self.actual_dipole_moment = self.actual_dipole_moment + (self.commanded_dipole_moment - self.actual_dipole_moment) * alpha;

        if self.fault_mode == ActuatorFaultMode::Degraded {
            self.actual_dipole_moment * 0.5
        } else {
            self.actual_dipole_moment
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_tracks_command_after_several_time_constants() {
        let mut torquer = MagnetorquerSet::new(MagnetorquerConfig::default());
        torquer.command(Vec3::new(0.1, 0.0, 0.0));
        let mut output = Vec3::ZERO;
        for _ in 0..50 {
            output = torquer.update(0.1);
        }
        assert!((output.x - 0.1).abs() < 1e-3);
    }

    #[test]
    fn command_is_clamped_to_the_maximum_dipole_moment() {
        let mut torquer = MagnetorquerSet::new(MagnetorquerConfig::default());
        torquer.command(Vec3::new(10.0, 0.0, 0.0));
        assert!((torquer.commanded_dipole_moment.norm() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn stuck_off_always_outputs_zero() {
        let mut torquer = MagnetorquerSet::new(MagnetorquerConfig::default());
        torquer.command(Vec3::new(0.1, 0.0, 0.0));
        torquer.inject_fault(ActuatorFaultMode::StuckOff);
        assert_eq!(torquer.update(0.1), Vec3::ZERO);
    }
}
