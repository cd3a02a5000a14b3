use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Number of past positions kept in an agent's trail.
pub const TRAIL_LENGTH: usize = 10;

/// Collision radius shared by every agent.
pub const AGENT_RADIUS: f64 = 6.0;

/// The two kinds of mobile organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Prey => write!(f, "prey"),
            Species::Predator => write!(f, "predator"),
        }
    }
}

/// A mobile organism.
///
/// Prey and predators share this record; the `species` tag selects which
/// update system drives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Stable handle, used for mating links instead of references.
    pub id: Uuid,
    pub species: Species,
    pub position: DVec2,
    /// Heading. Unit length after any update that sets it.
    pub velocity: DVec2,
    /// Distance covered per tick along `velocity`.
    pub speed: f64,
    pub energy: f64,
    pub max_energy: f64,
    /// Most recent positions, newest at the back.
    pub trail: VecDeque<DVec2>,
    /// Ticks left before the pair reproduces. 0 means not mating.
    pub mating_timer: u32,
    /// Partner of the current mating, always mutual.
    pub mating_partner: Option<Uuid>,
    /// Ticks left before the agent may look for a mate again.
    pub reproduction_cooldown: u32,
    pub radius: f64,
}

impl Agent {
    /// Fresh agent at half of `max_energy` with an empty trail.
    #[must_use]
    pub fn new(
        id: Uuid,
        species: Species,
        position: DVec2,
        velocity: DVec2,
        speed: f64,
        max_energy: f64,
    ) -> Self {
        Self {
            id,
            species,
            position,
            velocity,
            speed,
            energy: max_energy * 0.5,
            max_energy,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            mating_timer: 0,
            mating_partner: None,
            reproduction_cooldown: 0,
            radius: AGENT_RADIUS,
        }
    }

    #[must_use]
    pub fn is_mating(&self) -> bool {
        self.mating_timer > 0
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Energy as a fraction of capacity, for energy bars.
    #[must_use]
    pub fn energy_fraction(&self) -> f64 {
        (self.energy / self.max_energy).clamp(0.0, 1.0)
    }

    /// Adds `amount` without exceeding `max_energy`.
    pub fn feed(&mut self, amount: f64) {
        self.energy = (self.energy + amount).min(self.max_energy);
    }

    /// Records the current position, dropping the oldest beyond `TRAIL_LENGTH`.
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.position);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Drops any mating link and timer.
    pub fn abandon_mating(&mut self) {
        self.mating_partner = None;
        self.mating_timer = 0;
    }
}
