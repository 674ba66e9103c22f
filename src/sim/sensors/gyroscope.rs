//! Three-axis rate gyroscope model (C12): Gaussian measurement noise plus
//! a slowly drifting bias random walk, with an explicit fault mode.

use crate::math::Vec3;
use crate::rng::Lcg;
use crate::sim::sensors::SensorFaultMode;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct GyroscopeConfig {
    pub noise_std_rad_s: f64,
    pub bias_random_walk_std_rad_s_sqrt_s: f64,
    pub saturation_rad_s: f64,
}

impl Default for GyroscopeConfig {
    fn default() -> Self {
        GyroscopeConfig {
            noise_std_rad_s: 0.0017,
            bias_random_walk_std_rad_s_sqrt_s: 1e-6,
            saturation_rad_s: 8.7,
        }
    }
}

pub struct Gyroscope {
    config: GyroscopeConfig,
    rng: Lcg,
    fault_mode: SensorFaultMode,
    bias_rad_s: Vec3,
    last_reading_rad_s: Vec3,
}

impl Gyroscope {
    pub fn new(config: GyroscopeConfig, seed: u64) -> Self {
        Gyroscope {
            config,
            rng: Lcg::new(seed),
            fault_mode: SensorFaultMode::Nominal,
            bias_rad_s: Vec3::ZERO,
            last_reading_rad_s: Vec3::ZERO,
        }
    }

    pub fn inject_fault(&mut self, mode: SensorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = SensorFaultMode::Nominal;
    }

    fn saturate(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            v.x.clamp(-self.config.saturation_rad_s, self.config.saturation_rad_s),
            v.y.clamp(-self.config.saturation_rad_s, self.config.saturation_rad_s),
            v.z.clamp(-self.config.saturation_rad_s, self.config.saturation_rad_s),
        )
    }

    pub fn measure(&mut self, truth_body_rad_s: Vec3, dt: f64) -> Vec3 {
        match self.fault_mode {
            SensorFaultMode::Offline => return Vec3::new(f64::NAN, f64::NAN, f64::NAN),
            SensorFaultMode::Stuck => return self.last_reading_rad_s,
            SensorFaultMode::Nominal | SensorFaultMode::Degraded => {}
        }

        let walk_std = self.config.bias_random_walk_std_rad_s_sqrt_s * dt.max(0.0).sqrt();
        self.bias_rad_s = self.bias_rad_s
            + Vec3::new(self.rng.gaussian_scaled(walk_std), self.rng.gaussian_scaled(walk_std), self.rng.gaussian_scaled(walk_std));

        let noise_multiplier = if self.fault_mode == SensorFaultMode::Degraded { 10.0 } else { 1.0 };
        let noisy = truth_body_rad_s
            + self.bias_rad_s
            + Vec3::new(
                self.rng.gaussian_scaled(self.config.noise_std_rad_s * noise_multiplier),
                self.rng.gaussian_scaled(self.config.noise_std_rad_s * noise_multiplier),
                self.rng.gaussian_scaled(self.config.noise_std_rad_s * noise_multiplier),
            );

        let reading = self.saturate(noisy);
        self.last_reading_rad_s = reading;
        reading
    }
}
