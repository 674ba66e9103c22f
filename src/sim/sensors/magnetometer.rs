//! Three-axis magnetometer model (C12): Gaussian noise plus a fixed
//! scale/alignment error and quantisation, with an explicit fault mode.

use crate::math::Vec3;
use crate::rng::Lcg;
use crate::sim::sensors::SensorFaultMode;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct MagnetometerConfig {
    pub noise_std_tesla: f64,
    pub scale_factor_error: f64,
    pub quantization_tesla: f64,
}

impl Default for MagnetometerConfig {
    fn default() -> Self {
        MagnetometerConfig {
            noise_std_tesla: 5e-8,
            scale_factor_error: 1.002,
            quantization_tesla: 1e-9,
        }
    }
}

pub struct Magnetometer {
    config: MagnetometerConfig,
    rng: Lcg,
    fault_mode: SensorFaultMode,
    last_reading_tesla: Vec3,
}

impl Magnetometer {
    pub fn new(config: MagnetometerConfig, seed: u64) -> Self {
        Magnetometer { config, rng: Lcg::new(seed), fault_mode: SensorFaultMode::Nominal, last_reading_tesla: Vec3::ZERO }
    }

    pub fn inject_fault(&mut self, mode: SensorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = SensorFaultMode::Nominal;
    }

    fn quantize(&self, value: f64) -> f64 {
        if self.config.quantization_tesla <= 0.0 {
            value
        } else {
            (value / self.config.quantization_tesla).round() * self.config.quantization_tesla
        }
    }

    /// `truth_body_tesla` is the ambient field already rotated into the
    /// body frame by the caller.
    pub fn measure(&mut self, truth_body_tesla: Vec3, _dt: f64) -> Vec3 {
        match self.fault_mode {
            SensorFaultMode::Offline => return Vec3::new(f64::NAN, f64::NAN, f64::NAN),
            SensorFaultMode::Stuck => return self.last_reading_tesla,
            SensorFaultMode::Nominal | SensorFaultMode::Degraded => {}
        }

        let noise_multiplier = if self.fault_mode == SensorFaultMode::Degraded { 8.0 } else { 1.0 };
        let scaled = truth_body_tesla * self.config.scale_factor_error;
        let noisy = Vec3::new(
            self.quantize(scaled.x + self.rng.gaussian_scaled(self.config.noise_std_tesla * noise_multiplier)),
            self.quantize(scaled.y + self.rng.gaussian_scaled(self.config.noise_std_tesla * noise_multiplier)),
            self.quantize(scaled.z + self.rng.gaussian_scaled(self.config.noise_std_tesla * noise_multiplier)),
        );
        self.last_reading_tesla = noisy;
        noisy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_reading_is_close_to_truth() {
        let mut sensor = Magnetometer::new(MagnetometerConfig::default(), 1);
        let truth = Vec3::new(2e-5, -1e-5, 3e-5);
        let reading = sensor.measure(truth, 0.1);
        assert!((reading - truth).norm() < 1e-6);
    }

    #[test]
    fn offline_returns_nan() {
        let mut sensor = Magnetometer::new(MagnetometerConfig::default(), 1);
        sensor.inject_fault(SensorFaultMode::Offline);
        let reading = sensor.measure(Vec3::new(1e-5, 0.0, 0.0), 0.1);
        assert!(reading.x.is_nan());
    }

    #[test]
    fn stuck_returns_the_previous_reading() {
        let mut sensor = Magnetometer::new(MagnetometerConfig::default(), 1);
        let first = sensor.measure(Vec3::new(1e-5, 2e-5, 3e-5), 0.1);
        sensor.inject_fault(SensorFaultMode::Stuck);
        let second = sensor.measure(Vec3::new(9e-5, 9e-5, 9e-5), 0.1);
        assert_eq!(first, second);
    }
}
