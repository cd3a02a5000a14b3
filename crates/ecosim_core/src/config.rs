//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to an optional
//! `config.toml`. Every field has a default matching the reference ecosystem,
//! so an empty file (or no file at all) yields a working simulation. Species
//! tables (`[prey]`, `[predator]`) are all-or-nothing: when present, every
//! field must be given.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800
//! height = 600
//! initial_prey = 50
//! initial_predators = 3
//! seed = 42
//!
//! [flocking]
//! vision_radius = 60.0
//!
//! [hunting]
//! wander_chance = 0.02
//! ```

use serde::{Deserialize, Serialize};

/// World-level parameters: plane size, seeding and food supply.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub initial_prey: usize,
    pub initial_predators: usize,
    pub initial_food: usize,
    /// Periodic spawning stops once this many pellets are on the map.
    pub max_food: usize,
    /// Ticks between food spawning attempts.
    pub food_spawn_interval: u64,
    pub food_spawn_min: usize,
    pub food_spawn_max: usize,
    /// Pellets dropped by one add-food key press.
    pub food_batch: usize,
    pub obstacle_radius: f64,
    /// Half-width of the square around the parents' midpoint where a child lands.
    pub birth_jitter: f64,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            initial_prey: 50,
            initial_predators: 3,
            initial_food: 80,
            max_food: 300,
            food_spawn_interval: 30,
            food_spawn_min: 1,
            food_spawn_max: 4,
            food_batch: 10,
            obstacle_radius: 30.0,
            birth_jitter: 10.0,
            seed: None,
        }
    }
}

/// Energy, reproduction and feeding parameters of one species.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    pub speed: f64,
    pub max_energy: f64,
    /// Energy lost every tick, mating included.
    pub upkeep: f64,
    /// Both partners need strictly more energy than this to pair up.
    pub mate_threshold: f64,
    /// Ticks a pair spends mating before the child is born.
    pub mating_duration: u32,
    pub mate_range: f64,
    /// Energy each parent pays for one child.
    pub reproduction_cost: f64,
    pub reproduction_cooldown: u32,
    /// Distance below which the agent eats its food (prey) or victim (predator).
    pub eat_range: f64,
    pub eat_gain: f64,
}

impl SpeciesConfig {
    #[must_use]
    pub fn prey() -> Self {
        Self {
            speed: 2.0,
            max_energy: 200.0,
            upkeep: 0.03,
            mate_threshold: 120.0,
            mating_duration: 60,
            mate_range: 20.0,
            reproduction_cost: 30.0,
            reproduction_cooldown: 100,
            eat_range: 6.0,
            eat_gain: 30.0,
        }
    }

    #[must_use]
    pub fn predator() -> Self {
        Self {
            speed: 3.0,
            max_energy: 400.0,
            upkeep: 0.06,
            mate_threshold: 300.0,
            mating_duration: 300,
            mate_range: 20.0,
            reproduction_cost: 50.0,
            reproduction_cooldown: 200,
            eat_range: 8.0,
            eat_gain: 80.0,
        }
    }

    fn validate(&self, name: &str) -> anyhow::Result<()> {
        anyhow::ensure!(self.speed > 0.0, "{name}: speed must be positive");
        anyhow::ensure!(self.max_energy > 0.0, "{name}: max energy must be positive");
        anyhow::ensure!(self.upkeep >= 0.0, "{name}: upkeep must be non-negative");
        anyhow::ensure!(
            self.mate_threshold >= 0.0,
            "{name}: mate threshold must be non-negative"
        );
        anyhow::ensure!(
            self.mating_duration > 0,
            "{name}: mating duration must be positive"
        );
        anyhow::ensure!(self.mate_range >= 0.0, "{name}: mate range must be non-negative");
        anyhow::ensure!(
            self.reproduction_cost >= 0.0,
            "{name}: reproduction cost must be non-negative"
        );
        anyhow::ensure!(self.eat_range >= 0.0, "{name}: eat range must be non-negative");
        anyhow::ensure!(self.eat_gain >= 0.0, "{name}: eat gain must be non-negative");
        Ok(())
    }
}

/// Prey steering: flocking, fleeing and foraging.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FlockingConfig {
    pub neighbor_radius: f64,
    pub separation_radius: f64,
    pub alignment_weight: f64,
    pub cohesion_weight: f64,
    pub separation_weight: f64,
    /// Fraction of the combined flocking force added to the heading.
    pub steering_factor: f64,
    /// Flock size (exclusive) above which `medium_flock_speed` applies.
    pub medium_flock_size: usize,
    pub medium_flock_speed: f64,
    /// Flock size (exclusive) above which `large_flock_speed` applies.
    pub large_flock_size: usize,
    pub large_flock_speed: f64,
    /// Predators closer than this make prey flee.
    pub vision_radius: f64,
    /// Prey below this energy go looking for food.
    pub hunger_threshold: f64,
    pub forage_radius: f64,
}

impl Default for FlockingConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: 50.0,
            separation_radius: 20.0,
            alignment_weight: 0.5,
            cohesion_weight: 0.3,
            separation_weight: 1.0,
            steering_factor: 0.2,
            medium_flock_size: 5,
            medium_flock_speed: 2.3,
            large_flock_size: 10,
            large_flock_speed: 2.7,
            vision_radius: 50.0,
            hunger_threshold: 80.0,
            forage_radius: 200.0,
        }
    }
}

/// Predator steering: hunting and random wander.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct HuntingConfig {
    pub hunt_radius: f64,
    /// Per-tick probability of a wander nudge when no prey is in range.
    pub wander_chance: f64,
    /// Half-width of the square the wander nudge is drawn from.
    pub wander_strength: f64,
}

impl Default for HuntingConfig {
    fn default() -> Self {
        Self {
            hunt_radius: 300.0,
            wander_chance: 0.02,
            wander_strength: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub prey: SpeciesConfig,
    pub predator: SpeciesConfig,
    pub flocking: FlockingConfig,
    pub hunting: HuntingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            prey: SpeciesConfig::prey(),
            predator: SpeciesConfig::predator(),
            flocking: FlockingConfig::default(),
            hunting: HuntingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parameters of `species`.
    #[must_use]
    pub fn species(&self, species: ecosim_data::Species) -> &SpeciesConfig {
        match species {
            ecosim_data::Species::Prey => &self.prey,
            ecosim_data::Species::Predator => &self.predator,
        }
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first parameter that would make the
    /// simulation ill-defined (empty plane, obstacles wider than the plane,
    /// probabilities outside [0, 1], inverted spawn ranges).
    pub fn validate(&self) -> anyhow::Result<()> {
        let w = &self.world;
        anyhow::ensure!(w.width > 0, "World width must be positive");
        anyhow::ensure!(w.height > 0, "World height must be positive");
        anyhow::ensure!(
            w.initial_prey <= 100_000 && w.initial_predators <= 100_000,
            "Initial population too large (max 100000 per species)"
        );
        anyhow::ensure!(
            w.food_spawn_interval > 0,
            "Food spawn interval must be positive"
        );
        anyhow::ensure!(
            w.food_spawn_min <= w.food_spawn_max,
            "Food spawn min must not exceed food spawn max"
        );
        anyhow::ensure!(w.obstacle_radius > 0.0, "Obstacle radius must be positive");
        anyhow::ensure!(
            w.obstacle_radius * 2.0 <= f64::from(w.width.min(w.height)),
            "Obstacle radius too large for the world"
        );
        anyhow::ensure!(w.birth_jitter >= 0.0, "Birth jitter must be non-negative");

        self.prey.validate("prey")?;
        self.predator.validate("predator")?;

        let f = &self.flocking;
        anyhow::ensure!(
            f.neighbor_radius >= 0.0 && f.separation_radius >= 0.0,
            "Flocking radii must be non-negative"
        );
        anyhow::ensure!(
            f.medium_flock_speed > 0.0 && f.large_flock_speed > 0.0,
            "Flock speeds must be positive"
        );
        anyhow::ensure!(
            f.medium_flock_size <= f.large_flock_size,
            "Medium flock size must not exceed large flock size"
        );
        anyhow::ensure!(f.vision_radius >= 0.0, "Vision radius must be non-negative");
        anyhow::ensure!(f.forage_radius >= 0.0, "Forage radius must be non-negative");

        let h = &self.hunting;
        anyhow::ensure!(h.hunt_radius >= 0.0, "Hunt radius must be non-negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&h.wander_chance),
            "Wander chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            h.wander_strength >= 0.0,
            "Wander strength must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates a `config.toml` document. Missing tables and
    /// fields fall back to their defaults.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Digest of the behavioural parameters, used to label runs.
    ///
    /// The seed and initial populations are excluded so two runs of the same
    /// rules compare equal.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.prey).as_bytes());
        hasher.update(format!("{:?}", self.predator).as_bytes());
        hasher.update(format!("{:?}", self.flocking).as_bytes());
        hasher.update(format!("{:?}", self.hunting).as_bytes());
        hasher.update(
            format!(
                "{}x{}:{}:{}",
                self.world.width, self.world.height, self.world.max_food, self.world.food_spawn_interval
            )
            .as_bytes(),
        );
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = SimConfig {
            world: WorldConfig {
                width: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_obstacle_wider_than_world() {
        let config = SimConfig {
            world: WorldConfig {
                width: 40,
                height: 40,
                obstacle_radius: 30.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_food_spawn_range() {
        let config = SimConfig {
            world: WorldConfig {
                food_spawn_min: 5,
                food_spawn_max: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_wander_chance() {
        let config = SimConfig {
            hunting: HuntingConfig {
                wander_chance: 1.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_species_upkeep() {
        let mut config = SimConfig::default();
        config.predator.upkeep = -0.1;
        let err = config.validate().expect_err("negative upkeep must be rejected");
        assert!(err.to_string().contains("predator"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimConfig::from_toml(
            r#"
            [world]
            width = 400
            seed = 7

            [prey]
            speed = 2.5
            max_energy = 150.0
            upkeep = 0.05
            mate_threshold = 90.0
            mating_duration = 30
            mate_range = 15.0
            reproduction_cost = 20.0
            reproduction_cooldown = 50
            eat_range = 6.0
            eat_gain = 25.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.world.width, 400);
        assert_eq!(config.world.height, 600);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.prey.mating_duration, 30);
        assert_eq!(config.predator.max_energy, 400.0);
        assert_eq!(config.hunting.hunt_radius, 300.0);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        assert!(SimConfig::from_toml("[world]\nfood_spawn_interval = 0\n").is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let a = SimConfig::default();
        let mut b = SimConfig::default();
        b.world.seed = Some(99);
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.prey.upkeep = 0.5;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
