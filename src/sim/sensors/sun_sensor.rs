//! Six-face coarse sun-sensor array (C12): each face has a fixed outward
//! normal and a field-of-view half-angle; only faces whose normal sees
//! the Sun within the field of view contribute a reading, giving the
//! composite array Earth-albedo-insensitive behaviour (no face looks at
//! Earth continuously generates a false reading) without modelling
//! albedo radiance directly.

use crate::math::Vec3;
use crate::rng::Lcg;
use crate::sim::sensors::SensorFaultMode;

const FACE_NORMALS: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct SunSensorConfig {
    pub field_of_view_half_angle_deg: f64,
    pub angle_noise_std_rad: f64,
}

impl Default for SunSensorConfig {
    fn default() -> Self {
        SunSensorConfig { field_of_view_half_angle_deg: 60.0, angle_noise_std_rad: 0.02 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunSensorReading {
    /// Estimated sun-direction unit vector in body frame, averaged from
    /// whichever faces see the Sun.
    pub direction_body: Option<Vec3>,
    pub faces_illuminated: u8,
}

pub struct SunSensorArray {
    config: SunSensorConfig,
    rng: Lcg,
    fault_mode: SensorFaultMode,
}

impl SunSensorArray {
    pub fn new(config: SunSensorConfig, seed: u64) -> Self {
        SunSensorArray { config, rng: Lcg::new(seed), fault_mode: SensorFaultMode::Nominal }
    }

    pub fn inject_fault(&mut self, mode: SensorFaultMode) {
        self.fault_mode = mode;
    }

    pub fn clear_fault(&mut self) {
        self.fault_mode = SensorFaultMode::Nominal;
    }

    /// `sun_direction_body` is the true (noiseless) sun-direction unit
    /// vector in body frame, or `None` when the spacecraft is eclipsed.
    pub fn measure(&mut self, sun_direction_body: Option<Vec3>, _dt: f64) -> SunSensorReading {
        if self.fault_mode == SensorFaultMode::Offline {
            return SunSensorReading { direction_body: None, faces_illuminated: 0 };
        }

        let Some(sun_dir) = sun_direction_body else {
            return SunSensorReading { direction_body: None, faces_illuminated: 0 };
        };

        let fov_cos = self.config.field_of_view_half_angle_deg.to_radians().cos();
        let noise_std = if self.fault_mode == SensorFaultMode::Degraded {
            self.config.angle_noise_std_rad * 10.0
        } else {
            self.config.angle_noise_std_rad
        };

        let mut sum = Vec3::ZERO;
        let mut faces_illuminated = 0u8;
        for normal in FACE_NORMALS {
            if normal.dot(&sun_dir) >= fov_cos {
                faces_illuminated += 1;
                sum = sum + sun_dir;
            }
        }

        if faces_illuminated == 0 {
            return SunSensorReading { direction_body: None, faces_illuminated: 0 };
        }

        let noisy = Vec3::new(
            sum.x / f64::from(faces_illuminated) + self.rng.gaussian_scaled(noise_std),
            sum.y / f64::from(faces_illuminated) + self.rng.gaussian_scaled(noise_std),
            sum.z / f64::from(faces_illuminated) + self.rng.gaussian_scaled(noise_std),
        );
        SunSensorReading { direction_body: Some(noisy.normalized()), faces_illuminated }
    }
}
