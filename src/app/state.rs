use anyhow::{Context, Result};
use ecosim_core::config::SimConfig;
use ecosim_core::Simulation;
use serde::Serialize;
use std::path::Path;

/// Totals printed at the end of a headless run.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed by this run.
    pub ticks: u64,
    pub final_tick: u64,
    pub prey: usize,
    pub predators: usize,
    pub food: usize,
    pub prey_births: u64,
    pub predator_births: u64,
    pub elapsed_ms: u64,
}

pub struct App {
    pub sim: Simulation,
    pub report_every: u64,
}

impl App {
    /// Reads a config file. A missing file yields the defaults; an unreadable
    /// or invalid one is an error.
    pub fn load_config(path: &Path) -> Result<SimConfig> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(SimConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        SimConfig::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Writes the default configuration as TOML, for editing.
    pub fn write_default_config(path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(&SimConfig::default())?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn new(config: SimConfig) -> Result<Self> {
        let sim = Simulation::new(config)?;
        Ok(Self {
            sim,
            report_every: 100,
        })
    }

    #[must_use]
    pub fn with_report_every(mut self, report_every: u64) -> Self {
        self.report_every = report_every;
        self
    }
}
