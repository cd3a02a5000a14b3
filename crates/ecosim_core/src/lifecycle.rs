//! Agent creation, births and birth accounting.

use crate::config::SimConfig;
use crate::motion::Bounds;
use crate::vector::random_unit;
use ecosim_data::{Agent, DVec2, Food, Obstacle, Species};
use rand::Rng;
use uuid::Uuid;

/// Fresh agent of `species` at `position` with a random heading.
pub fn create_agent_with_rng<R: Rng + ?Sized>(
    species: Species,
    position: DVec2,
    config: &SimConfig,
    rng: &mut R,
) -> Agent {
    let params = config.species(species);
    let id = Uuid::from_u128(rng.gen::<u128>());
    Agent::new(
        id,
        species,
        position,
        random_unit(rng),
        params.speed,
        params.max_energy,
    )
}

/// Fresh agent at a uniformly random position.
pub fn create_random_agent<R: Rng + ?Sized>(
    species: Species,
    config: &SimConfig,
    rng: &mut R,
) -> Agent {
    let bounds = Bounds::new(config.world.width, config.world.height);
    let position = bounds.random_point(rng);
    create_agent_with_rng(species, position, config, rng)
}

pub fn create_food<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Food {
    Food::new(bounds.random_point(rng))
}

/// Obstacle placed so that it lies entirely on the plane.
pub fn create_obstacle<R: Rng + ?Sized>(radius: f64, bounds: Bounds, rng: &mut R) -> Obstacle {
    let position = DVec2::new(
        rng.gen_range(radius..=bounds.width - radius),
        rng.gen_range(radius..=bounds.height - radius),
    );
    Obstacle::new(position, radius)
}

/// Running birth totals plus the counts of the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthCounters {
    pub prey_total: u64,
    pub predator_total: u64,
    pub prey_tick: u64,
    pub predator_tick: u64,
}

impl BirthCounters {
    pub fn record(&mut self, species: Species) {
        match species {
            Species::Prey => {
                self.prey_total += 1;
                self.prey_tick += 1;
            }
            Species::Predator => {
                self.predator_total += 1;
                self.predator_tick += 1;
            }
        }
    }

    /// Starts a new tick; totals are kept.
    pub fn reset_tick(&mut self) {
        self.prey_tick = 0;
        self.predator_tick = 0;
    }

    #[must_use]
    pub fn total(&self, species: Species) -> u64 {
        match species {
            Species::Prey => self.prey_total,
            Species::Predator => self.predator_total,
        }
    }
}

/// Holds children born during the update phase until the simulation commits
/// them to the live populations.
#[derive(Debug, Default)]
pub struct Nursery {
    pending: Vec<Agent>,
    pub counters: BirthCounters,
}

impl Nursery {
    /// Creates one child of `species` near the midpoint of its parents and
    /// counts the birth.
    ///
    /// The child lands at the midpoint plus a uniform offset of up to
    /// `birth_jitter` on each axis, clamped onto the plane.
    pub fn spawn_child<R: Rng + ?Sized>(
        &mut self,
        species: Species,
        parent1: DVec2,
        parent2: DVec2,
        config: &SimConfig,
        rng: &mut R,
    ) -> Uuid {
        let jitter = config.world.birth_jitter;
        let offset = DVec2::new(
            rng.gen_range(-jitter..=jitter),
            rng.gen_range(-jitter..=jitter),
        );
        let bounds = Bounds::new(config.world.width, config.world.height);
        let position = bounds.clamp(parent1.lerp(parent2, 0.5) + offset);
        let child = create_agent_with_rng(species, position, config, rng);
        let id = child.id;

        self.counters.record(species);
        tracing::debug!(%species, child = %id, x = position.x, y = position.y, "Birth");
        self.pending.push(child);
        id
    }

    #[must_use]
    pub fn pending(&self) -> &[Agent] {
        &self.pending
    }

    /// Hands over every child born since the last call.
    pub fn take_pending(&mut self) -> Vec<Agent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_create_agent_uses_species_parameters() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let prey = create_agent_with_rng(Species::Prey, DVec2::new(1.0, 2.0), &config, &mut rng);
        let pred = create_random_agent(Species::Predator, &config, &mut rng);

        assert_eq!(prey.max_energy, 200.0);
        assert_eq!(prey.energy, 100.0);
        assert_eq!(prey.speed, 2.0);
        assert_eq!(pred.max_energy, 400.0);
        assert_eq!(pred.speed, 3.0);
        assert_ne!(prey.id, pred.id);
        assert!((pred.velocity.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_obstacle_fits_on_plane() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let bounds = Bounds::new(800, 600);
        for _ in 0..200 {
            let obs = create_obstacle(30.0, bounds, &mut rng);
            assert!(obs.position.x >= 30.0 && obs.position.x <= 770.0);
            assert!(obs.position.y >= 30.0 && obs.position.y <= 570.0);
        }
    }

    #[test]
    fn test_spawn_child_near_midpoint() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut nursery = Nursery::default();
        let id = nursery.spawn_child(
            Species::Prey,
            DVec2::new(100.0, 100.0),
            DVec2::new(120.0, 100.0),
            &config,
            &mut rng,
        );

        let child = &nursery.pending()[0];
        assert_eq!(child.id, id);
        assert!((child.position.x - 110.0).abs() <= 10.0);
        assert!((child.position.y - 100.0).abs() <= 10.0);
        assert_eq!(nursery.counters.prey_total, 1);
        assert_eq!(nursery.counters.prey_tick, 1);

        nursery.counters.reset_tick();
        assert_eq!(nursery.counters.prey_tick, 0);
        assert_eq!(nursery.counters.total(Species::Prey), 1);
        assert_eq!(nursery.take_pending().len(), 1);
        assert!(nursery.pending().is_empty());
    }

    #[test]
    fn test_spawn_child_clamped_onto_plane() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut nursery = Nursery::default();
        for _ in 0..50 {
            nursery.spawn_child(Species::Predator, DVec2::ZERO, DVec2::ZERO, &config, &mut rng);
        }
        let bounds = Bounds::new(config.world.width, config.world.height);
        assert!(nursery.pending().iter().all(|c| bounds.contains(c.position)));
        assert_eq!(nursery.counters.predator_total, 50);
    }
}
