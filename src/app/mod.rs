pub mod input;
pub mod state;

pub use state::{App, RunSummary};

use anyhow::{Context, Result};
use std::path::Path;

impl App {
    /// Ticks the simulation until `max_ticks` is reached, the running flag is
    /// cleared, or both species are extinct.
    ///
    /// A progress line is logged every `report_every` ticks (never when zero).
    pub fn run(&mut self, max_ticks: Option<u64>) -> RunSummary {
        let mut ticks = 0u64;
        while self.sim.is_running() && max_ticks.map_or(true, |max| ticks < max) {
            let report = self.sim.tick();
            ticks += 1;

            if self.report_every > 0 && report.tick % self.report_every == 0 {
                tracing::info!(
                    tick = report.tick,
                    prey = self.sim.prey().len(),
                    predators = self.sim.predators().len(),
                    food = self.sim.food().len(),
                    "Progress"
                );
            }
            if self.sim.is_extinct() {
                tracing::info!(tick = report.tick, "Both populations extinct");
                break;
            }
        }
        self.summary(ticks)
    }

    fn summary(&self, ticks: u64) -> RunSummary {
        let births = self.sim.births();
        RunSummary {
            ticks,
            final_tick: self.sim.tick_count(),
            prey: self.sim.prey().len(),
            predators: self.sim.predators().len(),
            food: self.sim.food().len(),
            prey_births: births.prey_total,
            predator_births: births.predator_total,
            elapsed_ms: self.sim.metrics().elapsed().as_millis() as u64,
        }
    }

    /// Writes the population history as JSON.
    pub fn export_history(&self, path: &Path) -> Result<()> {
        let json = self.sim.history().to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        tracing::info!(path = %path.display(), samples = self.sim.history().len(), "History exported");
        Ok(())
    }
}
