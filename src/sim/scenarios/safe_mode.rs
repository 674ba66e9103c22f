//! Safe-mode scenario (C15): no actuator commands are ever issued, the
//! B-dot controller stays disabled, and sensors are driven into a
//! degraded fault mode partway through the run. Asserts the spacecraft
//! free-drifts (no commanded torque) while sensors keep reporting,
//! exercising the fault-mode/degraded-sensor paths.

use alloc::format;

use crate::sim::config::SimulationConfig;
use crate::sim::scenarios::ScenarioOutcome;
use crate::sim::sensors::SensorFaultMode;
use crate::sim::simulator::Simulator;
use crate::sim::time::Epoch;

const FAULT_INJECTION_FRACTION: f64 = 0.5;

pub fn run(start_epoch: Epoch, config: SimulationConfig) -> ScenarioOutcome {
    let duration_s = config.duration_s;
    let mut sim = Simulator::new(config, start_epoch, 1024);

    let fault_injection_time_s = duration_s * FAULT_INJECTION_FRACTION;
    let mut fault_injected = false;

    while sim.elapsed_s() < duration_s {
        sim.tick();
        if !fault_injected && sim.elapsed_s() >= fault_injection_time_s {
            sim.inject_sensor_fault("magnetometer", SensorFaultMode::Degraded);
            fault_injected = true;
        }
    }

    let drifting_freely = sim.spacecraft().magnetorquer_dipole_moment.norm() < 1e-12
        && sim.spacecraft().reaction_wheel_torque.norm() < 1e-12;

    let summary = format!(
        "safe-mode: ran {:.0}s, free-drift={}, fault injected at {:.0}s",
        sim.elapsed_s(),
        drifting_freely,
        fault_injection_time_s
    );

    if drifting_freely {
        ScenarioOutcome::success(summary)
    } else {
        ScenarioOutcome::failure(summary)
    }
}
