//! Baseline regression scenario (C15): one default orbit, B-dot
//! controller disabled, used as the reference run for the energy and
//! period testable properties (§8 properties 7/8).

use alloc::format;

use crate::sim::config::SimulationConfig;
use crate::sim::scenarios::ScenarioOutcome;
use crate::sim::simulator::Simulator;
use crate::sim::time::Epoch;

pub fn run(start_epoch: Epoch, config: SimulationConfig) -> ScenarioOutcome {
    let duration_s = config.duration_s;
    let mut sim = Simulator::new(config, start_epoch, 1024);

    let final_state = sim.run_for(duration_s);
    let elements = crate::sim::orbital::elements_from_state(final_state.orbital);

    ScenarioOutcome::success(format!(
        "nominal: ran {:.0}s, final altitude {:.1} km, eccentricity {:.5}",
        sim.elapsed_s(),
        elements.semi_major_axis_km - crate::sim::orbital::R_EARTH_KM,
        elements.eccentricity
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_scenario_completes_successfully() {
        let outcome = run(Epoch::from_unix_seconds(1_700_000_000.0), SimulationConfig::nominal());
        assert!(outcome.success);
    }
}
