//! Fixed-step simulator orchestrator (C14): ticks environment, sensors,
//! actuators, and dynamics in a fixed order every `dt`, and invokes
//! registered step callbacks with a read-only state snapshot.
//!
//! Ordering (§4.11): sensor reads within a tick observe the state that
//! existed at the top of the tick; actuator updates within a tick use the
//! commands issued by callbacks during the *previous* tick. Commands a
//! callback issues this tick only take effect starting next tick. This
//! keeps the loop feed-forward and reproducible for a given RNG seed.

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::math::{Mat3, Vec3};
use crate::sim::actuators::{ActuatorFaultMode, MagnetorquerSet, ReactionWheelArray};
use crate::sim::attitude::{self, AttitudeState, DetumbleController};
use crate::sim::config::SimulationConfig;
use crate::sim::environment::{eclipse, sun, IgrfDipoleModel};
use crate::sim::orbital::{self, OrbitalState, Perturbations};
use crate::sim::sensors::{gps::GpsReading, sun_sensor::SunSensorReading, GpsSensor, Gyroscope, Magnetometer, SensorFaultMode, SunSensorArray};
use crate::sim::spacecraft::Spacecraft;
use crate::sim::time::Epoch;

/// A read-only snapshot of the simulation state at the end of a tick,
/// handed to step callbacks and appended to history at the output rate.
#[derive(Debug, Clone, Copy)]
pub struct SimulationState {
    pub elapsed_s: f64,
    pub epoch: Epoch,
    pub orbital: OrbitalState,
    pub attitude: AttitudeState,
    /// True ambient field, rotated into the body frame. Control loops
    /// should read `magnetometer_reading_tesla` instead; this is kept for
    /// ground-truth comparisons (e.g. scenario assertions).
    pub magnetic_field_body_tesla: Vec3,
    pub sun_direction_body: Option<Vec3>,
    pub eclipse: eclipse::EclipseResult,
    pub ground_station_visible: bool,
    /// The noisy, biased field a real magnetometer would have reported
    /// this tick; what `DetumbleController` actually steers from.
    pub magnetometer_reading_tesla: Vec3,
    pub gyroscope_reading_rad_s: Vec3,
    pub sun_sensor_reading: SunSensorReading,
    pub gps_reading: GpsReading,
}

/// Commands a callback wants applied starting the *next* tick, per the
/// feed-forward ordering rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorCommand {
    pub magnetorquer_dipole_moment: Option<Vec3>,
    pub reaction_wheel_torque: Option<Vec3>,
}

type StepCallback<'a> = Box<dyn FnMut(&SimulationState, &mut ActuatorCommand) + 'a>;

pub struct Simulator<'a> {
    config: SimulationConfig,
    spacecraft: Spacecraft,
    epoch: Epoch,
    elapsed_s: f64,

    magnetic_model: IgrfDipoleModel,
    detumble: Option<DetumbleController>,

    magnetometer: Magnetometer,
    gyroscope: Gyroscope,
    sun_sensor: SunSensorArray,
    gps: GpsSensor,

    magnetorquers: MagnetorquerSet,
    reaction_wheels: ReactionWheelArray,

    pending_command: ActuatorCommand,
    history: Vec<SimulationState>,
    history_capacity: usize,
    last_history_push_s: f64,
    callbacks: Vec<StepCallback<'a>>,
}

fn decimal_year(julian_date: f64) -> f64 {
    2000.0 + (julian_date - 2_451_545.0) / 365.25
}

impl<'a> Simulator<'a> {
    pub fn new(config: SimulationConfig, start_epoch: Epoch, history_capacity: usize) -> Self {
        let initial_attitude = AttitudeState { orientation: crate::math::Quaternion::IDENTITY, angular_velocity_rad_s: Vec3::ZERO };
        let spacecraft = Spacecraft::new(config.initial_orbit, initial_attitude, config.spacecraft_params);
        Simulator {
            config,
            spacecraft,
            epoch: start_epoch,
            elapsed_s: 0.0,
            magnetic_model: IgrfDipoleModel::default(),
            detumble: None,
            magnetometer: Magnetometer::new(config.magnetometer_config, config.rng_seed ^ 0x01),
            gyroscope: Gyroscope::new(config.gyroscope_config, config.rng_seed ^ 0x02),
            sun_sensor: SunSensorArray::new(config.sun_sensor_config, config.rng_seed ^ 0x03),
            gps: GpsSensor::new(config.gps_config, config.rng_seed ^ 0x04),
            magnetorquers: MagnetorquerSet::new(config.magnetorquer_config),
            reaction_wheels: ReactionWheelArray::new(config.wheel_configuration, config.wheel_config),
            pending_command: ActuatorCommand::default(),
            history: Vec::new(),
            history_capacity,
            last_history_push_s: f64::NEG_INFINITY,
            callbacks: Vec::new(),
        }
    }

    pub fn set_initial_attitude(&mut self, attitude: AttitudeState) {
        self.spacecraft.attitude = attitude;
    }

    pub fn enable_detumble_controller(&mut self, controller: DetumbleController) {
        self.detumble = Some(controller);
    }

    pub fn inject_sensor_fault(&mut self, sensor: &str, mode: SensorFaultMode) {
        match sensor {
            "magnetometer" => self.magnetometer.inject_fault(mode),
            "gyroscope" => self.gyroscope.inject_fault(mode),
            "sun_sensor" => self.sun_sensor.inject_fault(mode),
            "gps" => self.gps.inject_fault(mode),
            other => debug!(sensor = other, "unknown sensor name, fault not injected"),
        }
    }

    pub fn inject_actuator_fault(&mut self, actuator: &str, mode: ActuatorFaultMode) {
        match actuator {
            "magnetorquer" => self.magnetorquers.inject_fault(mode),
            "reaction_wheels" => self.reaction_wheels.inject_fault(mode),
            other => debug!(actuator = other, "unknown actuator name, fault not injected"),
        }
    }

    pub fn register_step_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&SimulationState, &mut ActuatorCommand) + 'a,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn spacecraft(&self) -> &Spacecraft {
        &self.spacecraft
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn history(&self) -> &[SimulationState] {
        &self.history
    }

    /// Advances the simulation by exactly one `dt`, per the ordering in
    /// §4.11: time, environment, sensors, actuators, attitude, orbit,
    /// snapshot, clock.
    pub fn tick(&mut self) -> SimulationState {
        let dt = self.config.dt_s;

        // 1. Read time.
        let gmst = self.epoch.gmst_radians();
        let jd = self.epoch.julian_date();
        let year = decimal_year(jd);

        // 2. Compute environment using the state that existed at the top
        //    of the tick.
        let r_eci = self.spacecraft.orbital.position_km;
        let r_ecef = Mat3::rotation_z(-gmst).mul_vec(&r_eci);
        let b_field_ecef = self.magnetic_model.field_ecef_tesla(r_ecef, year);
        let b_field_eci = Mat3::rotation_z(gmst).mul_vec(&b_field_ecef);
        let b_field_body = self.spacecraft.attitude.orientation.rotate_inertial_to_body(&b_field_eci);

        let sun_eci = sun::sun_position_eci_km(jd);
        let eclipse = eclipse::classify(r_eci, sun_eci);
        let sun_direction_body = if eclipse.state == eclipse::EclipseState::Umbra {
            None
        } else {
            let dir_eci = (sun_eci - r_eci).normalized();
            Some(self.spacecraft.attitude.orientation.rotate_inertial_to_body(&dir_eci))
        };

        let ground_station_visible = self.config.ground_station.is_visible(r_eci, gmst);

        // 3. Run sensor models.
        let altitude_km = r_eci.norm() - orbital::R_EARTH_KM;
        let magnetometer_reading = self.magnetometer.measure(b_field_body, dt);
        let gyroscope_reading = self.gyroscope.measure(self.spacecraft.attitude.angular_velocity_rad_s, dt);
        let sun_sensor_reading = self.sun_sensor.measure(sun_direction_body, dt);
        let gps_reading = self.gps.measure(r_eci, self.spacecraft.orbital.velocity_km_s, altitude_km);

        // 4. Update actuators with commands issued by callbacks last
        //    tick, then compute magnetic torque from the current field.
        if let Some(moment) = self.pending_command.magnetorquer_dipole_moment {
            self.magnetorquers.command(moment);
        }
        if let Some(torque) = self.pending_command.reaction_wheel_torque {
            self.reaction_wheels.command(torque);
        }
        if let Some(detumble) = &mut self.detumble {
            let moment = detumble.update(magnetometer_reading, dt);
            self.magnetorquers.command(moment);
        }
        self.pending_command = ActuatorCommand::default();

        let dipole_moment = self.magnetorquers.update(dt);
        let wheel_reaction_torque = self.reaction_wheels.update(dt);
        self.spacecraft.magnetorquer_dipole_moment = dipole_moment;
        self.spacecraft.reaction_wheel_torque = wheel_reaction_torque;
        let magnetic_torque = attitude::magnetic_torque(dipole_moment, b_field_body);

        // 5. Sum torques, propagate attitude.
        let gravity_gradient = if self.config.features.enable_gravity_gradient {
            attitude::gravity_gradient_torque(self.spacecraft.nadir_body(), self.spacecraft.params.inertia, r_eci.norm())
        } else {
            Vec3::ZERO
        };
        let magnetic_term = if self.config.features.enable_magnetic_torque { magnetic_torque } else { Vec3::ZERO };
        let total_torque = gravity_gradient + magnetic_term + wheel_reaction_torque + self.spacecraft.disturbance_torque;

        self.spacecraft.attitude = attitude::propagate_rk4(self.spacecraft.attitude, total_torque, self.spacecraft.params.inertia, dt);

        // 6. Propagate orbit.
        let perturbations = match (self.config.features.enable_j2, self.config.features.enable_drag) {
            (true, true) => Perturbations::J2AndDrag,
            (true, false) => Perturbations::J2Only,
            (false, _) => Perturbations::TwoBodyOnly,
        };
        let drag_params = orbital::DragParams {
            cross_section_m2: self.spacecraft.params.drag_cross_section_m2,
            drag_coefficient: self.spacecraft.params.drag_coefficient,
            mass_kg: self.spacecraft.params.mass_kg,
        };
        self.spacecraft.orbital = orbital::propagate_rk4(self.spacecraft.orbital, dt, perturbations, Some(drag_params));

        // 7. Build the snapshot, append to history at the output rate,
        //    invoke callbacks.
        self.elapsed_s += dt;
        self.epoch = self.epoch.add_seconds(dt);

        let state = SimulationState {
            elapsed_s: self.elapsed_s,
            epoch: self.epoch,
            orbital: self.spacecraft.orbital,
            attitude: self.spacecraft.attitude,
            magnetic_field_body_tesla: b_field_body,
            sun_direction_body,
            eclipse,
            ground_station_visible,
            magnetometer_reading_tesla: magnetometer_reading,
            gyroscope_reading_rad_s: gyroscope_reading,
            sun_sensor_reading,
            gps_reading,
        };

        if self.elapsed_s - self.last_history_push_s >= self.config.output_interval_s {
            if self.history.len() >= self.history_capacity && !self.history.is_empty() {
                self.history.remove(0);
            }
            self.history.push(state);
            self.last_history_push_s = self.elapsed_s;
        }

        let mut next_command = ActuatorCommand::default();
        for callback in &mut self.callbacks {
            callback(&state, &mut next_command);
        }
        if next_command.magnetorquer_dipole_moment.is_some() {
            self.pending_command.magnetorquer_dipole_moment = next_command.magnetorquer_dipole_moment;
        }
        if next_command.reaction_wheel_torque.is_some() {
            self.pending_command.reaction_wheel_torque = next_command.reaction_wheel_torque;
        }

        trace!(elapsed_s = self.elapsed_s, "tick complete");
        state
    }

    /// Runs `tick` until `self.elapsed_s() >= duration_s`, returning the
    /// final snapshot.
    pub fn run_for(&mut self, duration_s: f64) -> SimulationState {
        let mut last = self.tick();
        while self.elapsed_s < duration_s {
            last = self.tick();
        }
        last
    }
}
