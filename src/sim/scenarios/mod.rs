//! Named, parameterised simulation runs built on [`crate::sim::simulator`]
//! (C15): nominal, detumble, eclipse, safe-mode, and ground-pass. Each
//! returns a typed [`ScenarioOutcome`] the CLI binary turns into an exit
//! code.

pub mod detumble;
pub mod eclipse;
pub mod ground_pass;
pub mod nominal;
pub mod safe_mode;

use alloc::string::String;

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub success: bool,
    pub summary: String,
}

impl ScenarioOutcome {
    pub fn success(summary: String) -> Self {
        ScenarioOutcome { success: true, summary }
    }

    pub fn failure(summary: String) -> Self {
        ScenarioOutcome { success: false, summary }
    }
}
