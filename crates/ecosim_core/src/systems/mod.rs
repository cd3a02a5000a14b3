//! Per-species update systems and the state they share during one pass.
//!
//! A pass walks one population by index. Nothing is removed from or appended
//! to the population while the pass runs: deaths are recorded in the pass's
//! dead set (and skipped by every scan), newborns go to the [`Nursery`]. The
//! simulation compacts and commits at the pipeline boundaries.

pub mod mating;
pub mod predator;
pub mod prey;

use crate::config::SimConfig;
use crate::lifecycle::Nursery;
use crate::motion::Bounds;
use ecosim_data::{Agent, Obstacle};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// What happened to an agent during its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentOutcome {
    /// Energy ran out; the agent took no action.
    Died,
    /// Waiting out the mating timer, no movement.
    Mating,
    /// The mating timer expired and a child was born.
    Reproduced,
    /// Steered and moved.
    Moved,
}

/// Shared state for one pass over a population.
pub struct PassContext<'a, R: Rng> {
    pub config: &'a SimConfig,
    pub obstacles: &'a [Obstacle],
    pub bounds: Bounds,
    pub rng: &'a mut R,
    pub nursery: &'a mut Nursery,
    index: HashMap<Uuid, usize>,
    dead: HashSet<Uuid>,
    paired: HashSet<Uuid>,
}

impl<'a, R: Rng> PassContext<'a, R> {
    /// Prepares a pass over `agents`, indexing them by id.
    pub fn new(
        config: &'a SimConfig,
        obstacles: &'a [Obstacle],
        rng: &'a mut R,
        nursery: &'a mut Nursery,
        agents: &[Agent],
    ) -> Self {
        let index = agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id, i))
            .collect();
        Self {
            config,
            obstacles,
            bounds: Bounds::new(config.world.width, config.world.height),
            rng,
            nursery,
            index,
            dead: HashSet::new(),
            paired: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_dead(&self, id: &Uuid) -> bool {
        self.dead.contains(id)
    }

    /// Position of `id` in the population, unless it died this pass.
    #[must_use]
    pub fn live_index(&self, id: &Uuid) -> Option<usize> {
        if self.dead.contains(id) {
            return None;
        }
        self.index.get(id).copied()
    }

    /// Marks `agents[i]` dead and releases its mating partner.
    pub fn kill(&mut self, agents: &mut [Agent], i: usize, cause: &str) {
        let id = agents[i].id;
        if !self.dead.insert(id) {
            return;
        }
        if let Some(partner) = agents[i].mating_partner.take() {
            if let Some(j) = self.index.get(&partner).copied() {
                agents[j].abandon_mating();
            }
        }
        agents[i].mating_timer = 0;
        tracing::debug!(species = %agents[i].species, id = %id, cause, "Death");
    }

    /// Records that `id` entered a pair during this pass.
    pub fn mark_paired(&mut self, id: Uuid) {
        self.paired.insert(id);
    }

    #[must_use]
    pub fn paired_this_pass(&self, id: &Uuid) -> bool {
        self.paired.contains(id)
    }

    /// Iterator over `(index, agent)` for every live agent except `skip`.
    pub fn live_others<'b>(
        &'b self,
        agents: &'b [Agent],
        skip: usize,
    ) -> impl Iterator<Item = (usize, &'b Agent)> + 'b {
        let dead = &self.dead;
        agents
            .iter()
            .enumerate()
            .filter(move |(j, a)| *j != skip && !dead.contains(&a.id))
    }

    /// Consumes the context, returning the ids that died during the pass.
    pub fn into_dead(self) -> HashSet<Uuid> {
        self.dead
    }
}

/// Deducts the per-tick upkeep. Returns `false` (after marking the agent dead)
/// when the agent starved.
pub fn metabolize<R: Rng>(agents: &mut [Agent], i: usize, upkeep: f64, ctx: &mut PassContext<'_, R>) -> bool {
    agents[i].energy -= upkeep;
    if agents[i].energy <= 0.0 {
        ctx.kill(agents, i, "starvation");
        return false;
    }
    true
}

/// Two distinct mutable elements of one slice.
pub(crate) fn pair_mut(agents: &mut [Agent], i: usize, j: usize) -> (&mut Agent, &mut Agent) {
    assert_ne!(i, j, "an agent cannot pair with itself");
    if i < j {
        let (left, right) = agents.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = agents.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::create_agent_with_rng;
    use ecosim_data::{DVec2, Species};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_kill_releases_partner() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agents: Vec<Agent> = (0..2)
            .map(|i| {
                create_agent_with_rng(Species::Prey, DVec2::new(f64::from(i), 0.0), &config, &mut rng)
            })
            .collect();
        let (a, b) = (agents[0].id, agents[1].id);
        agents[0].mating_partner = Some(b);
        agents[0].mating_timer = 10;
        agents[1].mating_partner = Some(a);
        agents[1].mating_timer = 10;

        let mut pass_rng = ChaCha8Rng::seed_from_u64(2);
        let mut nursery = Nursery::default();
        let mut ctx = PassContext::new(&config, &[], &mut pass_rng, &mut nursery, &agents);
        ctx.kill(&mut agents, 0, "test");

        assert!(ctx.is_dead(&a));
        assert_eq!(ctx.live_index(&a), None);
        assert_eq!(ctx.live_index(&b), Some(1));
        assert_eq!(agents[1].mating_partner, None);
        assert_eq!(agents[1].mating_timer, 0);
        assert_eq!(ctx.live_others(&agents, 1).count(), 0);
    }

    #[test]
    fn test_metabolize_kills_at_zero() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agents = vec![create_agent_with_rng(
            Species::Prey,
            DVec2::new(5.0, 5.0),
            &config,
            &mut rng,
        )];
        agents[0].energy = 0.03;

        let mut pass_rng = ChaCha8Rng::seed_from_u64(2);
        let mut nursery = Nursery::default();
        let mut ctx = PassContext::new(&config, &[], &mut pass_rng, &mut nursery, &agents);
        assert!(!metabolize(&mut agents, 0, 0.03, &mut ctx));
        assert!(ctx.into_dead().contains(&agents[0].id));
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agents: Vec<Agent> = (0..3)
            .map(|_| create_agent_with_rng(Species::Prey, DVec2::ZERO, &config, &mut rng))
            .collect();
        let ids: Vec<Uuid> = agents.iter().map(|a| a.id).collect();

        let (x, y) = pair_mut(&mut agents, 2, 0);
        assert_eq!((x.id, y.id), (ids[2], ids[0]));
        let (x, y) = pair_mut(&mut agents, 0, 1);
        assert_eq!((x.id, y.id), (ids[0], ids[1]));
    }
}
