//! Eclipse scenario (C15): multi-orbit run exercising the shadow model,
//! recording entry/exit times and per-orbit umbra duration for the
//! eclipse testable property (§8.11).

use alloc::format;
use alloc::vec::Vec;

use crate::sim::config::SimulationConfig;
use crate::sim::environment::eclipse::EclipseState;
use crate::sim::scenarios::ScenarioOutcome;
use crate::sim::simulator::Simulator;
use crate::sim::time::Epoch;

#[derive(Debug, Clone, Copy)]
pub struct UmbraInterval {
    pub enter_s: f64,
    pub exit_s: f64,
}

pub struct EclipseReport {
    pub outcome: ScenarioOutcome,
    pub umbra_intervals: Vec<UmbraInterval>,
}

pub fn run(start_epoch: Epoch, config: SimulationConfig) -> EclipseReport {
    let duration_s = config.duration_s;
    let mut sim = Simulator::new(config, start_epoch, 4096);

    let mut umbra_intervals = Vec::new();
    let mut current_enter: Option<f64> = None;

    while sim.elapsed_s() < duration_s {
        let state = sim.tick();
        match (current_enter, state.eclipse.state) {
            (None, EclipseState::Umbra) => current_enter = Some(state.elapsed_s),
            (Some(enter_s), state_kind) if state_kind != EclipseState::Umbra => {
                umbra_intervals.push(UmbraInterval { enter_s, exit_s: state.elapsed_s });
                current_enter = None;
            }
            _ => {}
        }
    }

    let outcome = ScenarioOutcome::success(format!(
        "eclipse: ran {:.0}s, {} umbra interval(s) observed",
        sim.elapsed_s(),
        umbra_intervals.len()
    ));

    EclipseReport { outcome, umbra_intervals }
}
