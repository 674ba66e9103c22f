//! GPS-style position/velocity fix sensor (C12, supplemented): a thin
//! noisy ECI position/velocity sensor with a fix-valid flag, modelling a
//! typical CubeSat COTS GPS receiver. Named in the sensor catalogue
//! alongside magnetometer/gyro/sun-sensor but not modelled as a
//! standalone module in the original source; follows their noise-model
//! idiom directly.

use crate::math::Vec3;
use crate::rng::Lcg;
use crate::sim::sensors::SensorFaultMode;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct GpsConfig {
    pub position_noise_std_km: f64,
    pub velocity_noise_std_km_s: f64,
    /// Altitude (km) above which COTS GPS receivers typically lose lock
    /// (ITAR/COCOM-style altitude limit), modelled as `fix_valid = false`.
    pub max_altitude_km: f64,
}

impl Default for GpsConfig {
    fn default() -> Self {
        GpsConfig { position_noise_std_km: 0.01, velocity_noise_std_km_s: 0.0001, max_altitude_km: 2000.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsReading {
    pub position_eci_km: Vec3,
    pub velocity_eci_km_s: Vec3,
    pub fix_valid: bool,
}

pub struct GpsSensor {
    config: GpsConfig,
    rng: Lcg,
    fault_mode: SensorFaultMode,
    last_reading: GpsReading,
}

impl GpsSensor {
    pub fn new(config: GpsConfig, seed: u64) -> Self {
        GpsSensor {
            config,
            rng: Lcg::new(seed),
            fault_mode: SensorFaultMode::Nominal,
            last_reading: GpsReading { position_eci_km: Vec3::ZERO, velocity_eci_km_s: Vec3::ZERO, fix_valid: false },
        }
    }

    pub fn inject_fault(&mut self, mode: SensorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = SensorFaultMode::Nominal;
    }

    pub fn measure(&mut self, truth_position_eci_km: Vec3, truth_velocity_eci_km_s: Vec3, altitude_km: f64) -> GpsReading {
        if self.fault_mode == SensorFaultMode::Offline {
            let reading = GpsReading { position_eci_km: Vec3::ZERO, velocity_eci_km_s: Vec3::ZERO, fix_valid: false };
            self.last_reading = reading;
            return reading;
        }
        if self.fault_mode == SensorFaultMode::Stuck {
            return self.last_reading;
        }

        let noise_multiplier = if self.fault_mode == SensorFaultMode::Degraded { 20.0 } else { 1.0 };
        let fix_valid = altitude_km <= self.config.max_altitude_km;

        let position = truth_position_eci_km
            + Vec3::new(
                self.rng.gaussian_scaled(self.config.position_noise_std_km * noise_multiplier),
                self.rng.gaussian_scaled(self.config.position_noise_std_km * noise_multiplier),
                self.rng.gaussian_scaled(self.config.position_noise_std_km * noise_multiplier),
            );
        let velocity = truth_velocity_eci_km_s
            + Vec3::new(
                self.rng.gaussian_scaled(self.config.velocity_noise_std_km_s * noise_multiplier),
                self.rng.gaussian_scaled(self.config.velocity_noise_std_km_s * noise_multiplier),
                self.rng.gaussian_scaled(self.config.velocity_noise_std_km_s * noise_multiplier),
            );

        let reading = GpsReading { position_eci_km: position, velocity_eci_km_s: velocity, fix_valid };
        self.last_reading = reading;
        reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_is_valid_below_the_altitude_limit() {
        let mut sensor = GpsSensor::new(GpsConfig::default(), 11);
        let reading = sensor.measure(Vec3::new(6878.0, 0.0, 0.0), Vec3::new(0.0, 7.6, 0.0), 500.0);
        assert!(reading.fix_valid);
    }

    #[test]
    fn fix_is_invalid_above_the_altitude_limit() {
        let mut sensor = GpsSensor::new(GpsConfig::default(), 11);
        let reading = sensor.measure(Vec3::new(40000.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0), 33622.0);
        assert!(!reading.fix_valid);
    }

    #[test]
    fn reading_is_close_to_truth_position() {
        let mut sensor = GpsSensor::new(GpsConfig::default(), 11);
        let truth = Vec3::new(6878.0, 0.0, 0.0);
        let reading = sensor.measure(truth, Vec3::ZERO, 500.0);
        assert!((reading.position_eci_km - truth).norm() < 0.1);
    }
}
