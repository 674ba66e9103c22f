//! Rigid-body attitude dynamics (C10): quaternion kinematics plus Euler's
//! equation, gravity-gradient and magnetic torques, and the B-dot
//! detumble control law.

use crate::math::{Mat3, Quaternion, Vec3};
use crate::sim::integrators::rk4_step;
use crate::sim::orbital::MU_EARTH_KM3_S2;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttitudeState {
    pub orientation: Quaternion,
    pub angular_velocity_rad_s: Vec3,
}

/// Gravity-gradient torque `3*mu/r^3 * nadir x (I * nadir)`, `nadir` the
/// unit vector from spacecraft to Earth center expressed in body frame.
pub fn gravity_gradient_torque(nadir_body: Vec3, inertia: Mat3, orbit_radius_km: f64) -> Vec3 {
    let coefficient = 3.0 * MU_EARTH_KM3_S2 / orbit_radius_km.powi(3);
    let i_n = inertia.mul_vec(&nadir_body);
    nadir_body.cross(&i_n) * coefficient
}

/// Magnetic torque from a commanded magnetic dipole moment against the
/// ambient field, both in body frame.
pub fn magnetic_torque(dipole_moment_body: Vec3, field_body_tesla: Vec3) -> Vec3 {
    dipole_moment_body.cross(&field_body_tesla)
}

fn euler_derivative(angular_velocity: Vec3, torque: Vec3, inertia: Mat3, inertia_inv: Mat3) -> Vec3 {
    let i_omega = inertia.mul_vec(&angular_velocity);
    let gyroscopic = angular_velocity.cross(&i_omega);
    inertia_inv.mul_vec(&(torque - gyroscopic))
}

/// Advances attitude one RK4 step of `dt` seconds under constant `torque`
/// and principal-axis `inertia`, renormalising the quaternion afterward.
pub fn propagate_rk4(state: AttitudeState, torque: Vec3, inertia: Mat3, dt: f64) -> AttitudeState {
    let inertia_inv = inertia.inverse_diagonal();

    let y0 = [
        state.orientation.w,
        state.orientation.x,
        state.orientation.y,
        state.orientation.z,
        state.angular_velocity_rad_s.x,
        state.angular_velocity_rad_s.y,
        state.angular_velocity_rad_s.z,
    ];

    let f = move |_t: f64, y: &[f64; 7]| {
        let q = Quaternion::new(y[0], y[1], y[2], y[3]);
        let omega = Vec3::new(y[4], y[5], y[6]);
        let q_dot = q.derivative(&omega);
        let omega_dot = euler_derivative(omega, torque, inertia, inertia_inv);
        [q_dot.w, q_dot.x, q_dot.y, q_dot.z, omega_dot.x, omega_dot.y, omega_dot.z]
    };

    let y1 = rk4_step(f, 0.0, &y0, dt);
    let orientation = Quaternion::new(y1[0], y1[1], y1[2], y1[3]).normalized();
    let angular_velocity_rad_s = Vec3::new(y1[4], y1[5], y1[6]);

    AttitudeState { orientation, angular_velocity_rad_s }
}

/// B-dot detumble controller: commands a magnetic dipole opposing the
/// estimated rate of change of the body-frame field, `m = -k * Bdot`.
/// `Bdot` is estimated from successive body-frame field samples.
pub struct DetumbleController {
    gain: f64,
    previous_field_body_tesla: Option<Vec3>,
    max_dipole_moment_a_m2: f64,
}

impl DetumbleController {
    pub fn new(gain: f64, max_dipole_moment_a_m2: f64) -> Self {
        DetumbleController { gain, previous_field_body_tesla: None, max_dipole_moment_a_m2 }
    }

    /// Feeds one new body-frame field sample, returns the commanded dipole
    /// moment for this tick. Returns zero on the first sample (no rate
    /// estimate yet).
    pub fn update(&mut self, field_body_tesla: Vec3, dt: f64) -> Vec3 {
        let command = match self.previous_field_body_tesla {
            Some(previous) if dt > 1e-9 => {
                let b_dot = (field_body_tesla - previous) * (1.0 / dt);
                b_dot * (-self.gain)
            }
            _ => Vec3::ZERO,
        };
        self.previous_field_body_tesla = Some(field_body_tesla);

        let magnitude = command.norm();
        if magnitude > self.max_dipole_moment_a_m2 && magnitude > 1e-15 {
            command * (self.max_dipole_moment_a_m2 / magnitude)
        } else {
            command
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_inertia() -> Mat3 {
        Mat3::diagonal(0.02, 0.018, 0.015)
    }

    #[test]
    fn zero_torque_conserves_angular_momentum_in_inertial_frame() {
        let inertia = test_inertia();
        let mut state = AttitudeState {
            orientation: Quaternion::IDENTITY,
            angular_velocity_rad_s: Vec3::new(0.05, -0.02, 0.01),
        };

        let initial_l_body = inertia.mul_vec(&state.angular_velocity_rad_s);
        let initial_l_inertial = state.orientation.rotate_body_to_inertial(&initial_l_body);

        let dt = 0.1;
        for _ in 0..600 {
            state = propagate_rk4(state, Vec3::ZERO, inertia, dt);
        }

        let final_l_body = inertia.mul_vec(&state.angular_velocity_rad_s);
        let final_l_inertial = state.orientation.rotate_body_to_inertial(&final_l_body);

        assert!((final_l_inertial - initial_l_inertial).norm() < 1e-6);
    }

    #[test]
    fn quaternion_stays_unit_after_many_steps() {
        let inertia = test_inertia();
        let mut state = AttitudeState {
            orientation: Quaternion::IDENTITY,
            angular_velocity_rad_s: Vec3::new(0.3, 0.1, -0.2),
        };
        for _ in 0..1000 {
            state = propagate_rk4(state, Vec3::ZERO, inertia, 0.05);
        }
        assert!((state.orientation.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn detumble_controller_opposes_a_growing_field() {
        let mut controller = DetumbleController::new(1e4, 0.2);
        let _ = controller.update(Vec3::new(1e-5, 0.0, 0.0), 1.0);
        let command = controller.update(Vec3::new(2e-5, 0.0, 0.0), 1.0);
        assert!(command.x < 0.0);
    }

    #[test]
    fn detumble_command_is_saturated_at_the_configured_limit() {
        let mut controller = DetumbleController::new(1e12, 0.1);
        let _ = controller.update(Vec3::new(0.0, 0.0, 0.0), 1.0);
        let command = controller.update(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!((command.norm() - 0.1).abs() < 1e-9);
    }
}
