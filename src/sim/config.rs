//! Simulation configuration (§10.3): a serde-serializable bundle of
//! orbital, spacecraft, sensor/actuator, ground-station, and timing
//! parameters, plus feature toggles. Scenario constructors in
//! [`crate::sim::scenarios`] build presets of this struct the way the
//! original source's `create_*_config()` functions do.

use serde::{Deserialize, Serialize};

use crate::sim::actuators::{magnetorquer::MagnetorquerConfig, reaction_wheel::ReactionWheelConfig, WheelConfiguration};
use crate::sim::environment::GroundStation;
use crate::sim::orbital::{OrbitalState, MU_EARTH_KM3_S2, R_EARTH_KM};
use crate::sim::sensors::{gps::GpsConfig, gyroscope::GyroscopeConfig, magnetometer::MagnetometerConfig, sun_sensor::SunSensorConfig};
use crate::sim::spacecraft::SpacecraftPhysicalParams;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureToggles {
    pub enable_j2: bool,
    pub enable_drag: bool,
    pub enable_gravity_gradient: bool,
    pub enable_magnetic_torque: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        FeatureToggles {
            enable_j2: true,
            enable_drag: true,
            enable_gravity_gradient: true,
            enable_magnetic_torque: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_orbit: OrbitalState,
    pub spacecraft_params: SpacecraftPhysicalParams,
    pub magnetorquer_config: MagnetorquerConfig,
    pub wheel_configuration: WheelConfiguration,
    pub wheel_config: ReactionWheelConfig,
    pub magnetometer_config: MagnetometerConfig,
    pub gyroscope_config: GyroscopeConfig,
    pub sun_sensor_config: SunSensorConfig,
    pub gps_config: GpsConfig,
    pub ground_station: GroundStation,
    pub dt_s: f64,
    pub duration_s: f64,
    pub output_interval_s: f64,
    pub rng_seed: u64,
    pub features: FeatureToggles,
}

fn circular_orbit(altitude_km: f64) -> OrbitalState {
    circular_orbit_inclined(altitude_km, 0.0)
}

/// A circular orbit at `altitude_km` whose plane is tilted by
/// `inclination_deg` about the line of nodes (placed along the ECI
/// x-axis), used to build ground-track geometry the equatorial preset
/// can't reach.
fn circular_orbit_inclined(altitude_km: f64, inclination_deg: f64) -> OrbitalState {
    let r = R_EARTH_KM + altitude_km;
    let v = (MU_EARTH_KM3_S2 / r).sqrt();
    let inclination = inclination_deg.to_radians();
    OrbitalState {
        position_km: crate::math::Vec3::new(r, 0.0, 0.0),
        velocity_km_s: crate::math::Vec3::new(0.0, v * inclination.cos(), v * inclination.sin()),
    }
}

impl SimulationConfig {
    /// Baseline 500 km Sun-synchronous-like circular orbit, all
    /// perturbations enabled, detumble control disabled.
    pub fn nominal() -> Self {
        SimulationConfig {
            initial_orbit: circular_orbit(500.0),
            spacecraft_params: SpacecraftPhysicalParams::default(),
            magnetorquer_config: MagnetorquerConfig::default(),
            wheel_configuration: WheelConfiguration::ThreeAxis,
            wheel_config: ReactionWheelConfig::default(),
            magnetometer_config: MagnetometerConfig::default(),
            gyroscope_config: GyroscopeConfig::default(),
            sun_sensor_config: SunSensorConfig::default(),
            gps_config: GpsConfig::default(),
            ground_station: GroundStation::new(0.0, 0.0, 0.0),
            dt_s: 1.0,
            duration_s: 5676.0,
            output_interval_s: 10.0,
            rng_seed: 0,
            features: FeatureToggles::default(),
        }
    }

    /// Same orbit as `nominal`, longer duration, used by the detumble
    /// scenario which seeds its own initial tumble on top of this state.
    pub fn detumble() -> Self {
        SimulationConfig { duration_s: 7200.0, ..Self::nominal() }
    }

    /// A 3-orbit-plus run at a lower circular altitude, used by the
    /// eclipse scenario to exercise the shadow model multiple times.
    pub fn eclipse() -> Self {
        SimulationConfig { initial_orbit: circular_orbit(500.0), duration_s: 3.0 * 5676.0, ..Self::nominal() }
    }

    /// All actuators disabled in the feature toggles sense is not
    /// representable here (actuators are commanded, not toggled); the
    /// safe-mode scenario itself withholds all actuator commands. This
    /// preset only shortens the run and keeps perturbations nominal.
    pub fn safe_mode() -> Self {
        SimulationConfig { duration_s: 1800.0, ..Self::nominal() }
    }

    /// A ground-station-visible pass: an ISS-like 51.6-degree inclined
    /// orbit (the equatorial `nominal` preset never rises above a
    /// mid-latitude horizon) over a mid-latitude station.
    pub fn ground_pass() -> Self {
        SimulationConfig {
            initial_orbit: circular_orbit_inclined(500.0, 51.6),
            ground_station: GroundStation::new(37.4, -122.2, 0.03),
            duration_s: 2.0 * 5676.0,
            output_interval_s: 1.0,
            ..Self::nominal()
        }
    }
}
