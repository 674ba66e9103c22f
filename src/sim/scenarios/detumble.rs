//! Detumble scenario (C15): seeds a random initial tumble bounded by a
//! configurable maximum rate and a uniform random attitude, enables the
//! B-dot controller, and fails (per testable property 10, §8) if `|w|`
//! has not decayed by the required fraction within the configured
//! duration.

use alloc::format;

use crate::sim::attitude::{AttitudeState, DetumbleController};
use crate::sim::config::SimulationConfig;
use crate::sim::scenarios::ScenarioOutcome;
use crate::sim::simulator::Simulator;
use crate::sim::time::Epoch;
use crate::rng::Lcg;

/// Max magnitude (rad/s) of each initial angular-rate component, per
/// §4.12's "bounded by a configurable max" language.
const MAX_INITIAL_RATE_RAD_S: f64 = 10.0_f64.to_radians();
const REQUIRED_DECAY_FRACTION: f64 = 0.8;

pub fn run(start_epoch: Epoch, seed: u64, config: SimulationConfig) -> ScenarioOutcome {
    let duration_s = config.duration_s;
    let mut sim = Simulator::new(config, start_epoch, 1024);

    let mut rng = Lcg::new(seed);
    let initial_attitude = AttitudeState {
        orientation: rng.uniform_quaternion(),
        angular_velocity_rad_s: rng.uniform_vec3(MAX_INITIAL_RATE_RAD_S),
    };
    let initial_omega = initial_attitude.angular_velocity_rad_s.norm();
    sim.set_initial_attitude(initial_attitude);
    sim.enable_detumble_controller(DetumbleController::new(1e4, 0.2));

    let final_state = sim.run_for(duration_s);
    let final_omega = final_state.attitude.angular_velocity_rad_s.norm();

    let decay_fraction = if initial_omega > 1e-12 { 1.0 - final_omega / initial_omega } else { 1.0 };

    let summary = format!(
        "detumble: |w0|={:.4} rad/s, |wf|={:.6} rad/s, decay={:.1}%",
        initial_omega,
        final_omega,
        decay_fraction * 100.0
    );

    if decay_fraction >= REQUIRED_DECAY_FRACTION {
        ScenarioOutcome::success(summary)
    } else {
        ScenarioOutcome::failure(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detumble_converges_from_a_bounded_initial_tumble() {
        let outcome = run(Epoch::from_unix_seconds(1_700_000_000.0), 12345, SimulationConfig::detumble());
        assert!(outcome.success, "{}", outcome.summary);
    }
}
