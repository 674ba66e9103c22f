//! Reaction wheel array (C13, supplemented): distributes a commanded
//! body-frame torque across N wheels via the Moore-Penrose pseudo-inverse
//! of the wheel spin-axis matrix, with momentum saturation and Coulomb
//! friction per wheel.

use crate::math::Vec3;
use crate::sim::actuators::ActuatorFaultMode;

const MAX_WHEELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WheelConfiguration {
    /// Three wheels aligned with the principal body axes.
    ThreeAxis,
    /// Four wheels in a pyramid arrangement, tetrahedral skew angle,
    /// providing redundancy against a single wheel failure.
    Pyramid,
}

impl WheelConfiguration {
    fn spin_axes(self) -> heapless::Vec<Vec3, MAX_WHEELS> {
        let mut axes = heapless::Vec::new();
        match self {
            WheelConfiguration::ThreeAxis => {
                let _ = axes.push(Vec3::new(1.0, 0.0, 0.0));
                let _ = axes.push(Vec3::new(0.0, 1.0, 0.0));
                let _ = axes.push(Vec3::new(0.0, 0.0, 1.0));
            }
            WheelConfiguration::Pyramid => {
                let skew_rad: f64 = 54.73_f64.to_radians();
                let (s, c) = skew_rad.sin_cos();
                for k in 0..4 {
                    let phi = core::f64::consts::FRAC_PI_2 * k as f64;
                    let _ = axes.push(Vec3::new(s * phi.cos(), s * phi.sin(), c));
                }
            }
        }
        axes
    }
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct ReactionWheelConfig {
    pub max_momentum_n_m_s: f64,
    pub max_torque_n_m: f64,
    pub coulomb_friction_n_m: f64,
    pub time_constant_s: f64,
}

impl Default for ReactionWheelConfig {
    fn default() -> Self {
        ReactionWheelConfig {
            max_momentum_n_m_s: 0.02,
            max_torque_n_m: 0.005,
            coulomb_friction_n_m: 0.0002,
            time_constant_s: 0.2,
        }
    }
}

pub struct ReactionWheelArray {
    axes: heapless::Vec<Vec3, MAX_WHEELS>,
    config: ReactionWheelConfig,
    fault_mode: ActuatorFaultMode,
    commanded_wheel_torques: heapless::Vec<f64, MAX_WHEELS>,
    actual_wheel_torques: heapless::Vec<f64, MAX_WHEELS>,
    wheel_momenta_n_m_s: heapless::Vec<f64, MAX_WHEELS>,
}

impl ReactionWheelArray {
    pub fn new(configuration: WheelConfiguration, config: ReactionWheelConfig) -> Self {
        let axes = configuration.spin_axes();
        let n = axes.len();
        let mut commanded = heapless::Vec::new();
        let mut actual = heapless::Vec::new();
        let mut momenta = heapless::Vec::new();
        for _ in 0..n {
            let _ = commanded.push(0.0);
            let _ = actual.push(0.0);
            let _ = momenta.push(0.0);
        }
        ReactionWheelArray {
            axes,
            config,
            fault_mode: ActuatorFaultMode::Nominal,
            commanded_wheel_torques: commanded,
            actual_wheel_torques: actual,
            wheel_momenta_n_m_s: momenta,
        }
    }

    pub fn inject_fault(&mut self, mode: ActuatorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = ActuatorFaultMode::Nominal;
    }

    /// Distributes `torque_body` across wheels using the pseudo-inverse of
    /// the spin-axis matrix: for an N-wheel array with axis matrix `A`
    /// (3xN), the minimum-norm per-wheel torque is `A^T (A A^T)^-1 torque`.
    /// For the square 3-axis case this reduces to `A^-1 torque`.
    pub fn command(&mut self, torque_body: Vec3) {
        let n = self.axes.len();
        let mut raw = [0.0f64; MAX_WHEELS];

        if n == 3 {
            let a = &self.axes;
            let det = a[0].dot(&a[1].cross(&a[2]));
            if det.abs() > 1e-12 {
                raw[0] = a[1].cross(&a[2]).dot(&torque_body) / det;
                raw[1] = a[2].cross(&a[0]).dot(&torque_body) / det;
                raw[2] = a[0].cross(&a[1]).dot(&torque_body) / det;
            }
        } else {
            // Equal-distribution least-squares solution for the
            // redundant pyramid case: project torque onto each axis and
            // normalise by the sum of squared projections (a stable
            // approximation of the full pseudo-inverse for symmetric
            // wheel layouts).
            let mut axis_gains = [0.0f64; MAX_WHEELS];
            let mut denom = 0.0;
            for (i, axis) in self.axes.iter().enumerate() {
                axis_gains[i] = axis.dot(&torque_body);
                denom += axis_gains[i] * axis_gains[i];
            }
            if denom > 1e-15 {
                let scale = torque_body.norm() * torque_body.norm() / denom;
                for i in 0..n {
                    raw[i] = axis_gains[i] * scale;
                }
            }
        }

        for i in 0..n {
            let clamped = raw[i].clamp(-self.config.max_torque_n_m, self.config.max_torque_n_m);
            self.commanded_wheel_torques[i] = clamped;
        }
    }

    /// Advances each wheel's actual torque toward command with first-order
    /// lag, integrates momentum, applies Coulomb friction and saturation,
    /// and returns the net body-frame torque actually delivered.
    pub fn update(&mut self, dt: f64) -> Vec3 {
        if self.fault_mode == ActuatorFaultMode::StuckOff {
            for i in 0..self.axes.len() {
                self.actual_wheel_torques[i] = 0.0;
            }
            return Vec3::ZERO;
        }

        let alpha = 1.0 - (-dt / self.config.time_constant_s).exp();
        let mut net = Vec3::ZERO;

        for i in 0..self.axes.len() {
            if self.fault_mode == ActuatorFaultMode::StuckOn {
                // hold the last actual torque, do not track new commands
            } else {
                self.actual_wheel_torques[i] += (self.commanded_wheel_torques[i] - self.actual_wheel_torques[i]) * alpha;
            }

            let friction = self.config.coulomb_friction_n_m * self.wheel_momenta_n_m_s[i].signum();
            let mut torque = self.actual_wheel_torques[i] - friction;
            if self.fault_mode == ActuatorFaultMode::Degraded {
                torque *= 0.5;
            }

            let mut momentum = self.wheel_momenta_n_m_s[i] + torque * dt;
            if momentum.abs() > self.config.max_momentum_n_m_s {
                momentum = momentum.clamp(-self.config.max_momentum_n_m_s, self.config.max_momentum_n_m_s);
                torque = 0.0;
            }
            self.wheel_momenta_n_m_s[i] = momentum;

            net = net + self.axes[i] * (-torque);
        }
        net
    }

    pub fn wheel_momenta_n_m_s(&self) -> &[f64] {
        &self.wheel_momenta_n_m_s
    }
}
