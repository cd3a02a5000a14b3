use serde::{Deserialize, Serialize};

/// Population and birth counters recorded at the end of one tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistorySample {
    /// Tick this sample was taken on, starting at 1.
    pub tick: u64,
    /// Live prey.
    pub prey: usize,
    /// Live predators.
    pub predators: usize,
    /// Prey born since the simulation started.
    pub prey_births_total: u64,
    /// Predators born since the simulation started.
    pub predator_births_total: u64,
    /// Food pellets on the map.
    pub food: usize,
    /// Prey born during this tick.
    pub prey_births: u64,
    /// Predators born during this tick.
    pub predator_births: u64,
}
