//! The world engine: populations, food, obstacles and the tick pipeline.

use crate::command::SimCommand;
use crate::config::SimConfig;
use crate::history::{History, HistorySample};
use crate::invariants::{self, InvariantViolation};
use crate::lifecycle::{
    create_agent_with_rng, create_food, create_obstacle, create_random_agent, BirthCounters,
    Nursery,
};
use crate::metrics::Metrics;
use crate::motion::Bounds;
use crate::systems::{predator, prey, PassContext};
use ecosim_data::{Agent, DVec2, Food, Obstacle, Species};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;
use uuid::Uuid;

/// Summary of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub prey_births: u64,
    pub predator_births: u64,
    /// Prey lost to starvation or exhaustion during the update phase.
    pub prey_deaths: usize,
    pub predator_deaths: usize,
    pub food_eaten: usize,
    pub prey_eaten: usize,
    pub food_spawned: usize,
}

/// A predator/prey world on a bounded plane.
///
/// Each [`tick`](Self::tick) runs a fixed pipeline:
///
/// 1. apply queued commands;
/// 2. update every prey, then every predator (deaths compacted after each
///    pass, births committed after both);
/// 3. resolve feeding: prey on food, then predators on prey;
/// 4. periodic food spawning;
/// 5. append one history sample.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    bounds: Bounds,
    prey: Vec<Agent>,
    predators: Vec<Agent>,
    food: Vec<Food>,
    obstacles: Vec<Obstacle>,
    nursery: Nursery,
    food_timer: u64,
    tick: u64,
    history: History,
    commands: VecDeque<SimCommand>,
    rng: ChaCha8Rng,
    running: bool,
    metrics: Metrics,
}

impl Simulation {
    /// Builds and seeds a world from `config`.
    ///
    /// Uses `world.seed` when set, OS entropy otherwise.
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        let rng = seeded_rng(&config);
        Self::with_rng(config, rng)
    }

    /// Builds and seeds a world drawing all randomness from `rng`.
    pub fn with_rng(config: SimConfig, rng: ChaCha8Rng) -> anyhow::Result<Self> {
        let mut sim = Self::empty_with_rng(config, rng)?;
        let world = sim.config.world.clone();
        for _ in 0..world.initial_prey {
            sim.add_prey();
        }
        for _ in 0..world.initial_predators {
            sim.add_predator();
        }
        sim.add_food(world.initial_food);

        tracing::info!(
            prey = sim.prey.len(),
            predators = sim.predators.len(),
            food = sim.food.len(),
            fingerprint = %sim.config.fingerprint(),
            "Simulation seeded"
        );
        Ok(sim)
    }

    /// A world with no agents, food or obstacles, whatever the initial counts
    /// in `config` say.
    pub fn empty(config: SimConfig) -> anyhow::Result<Self> {
        let rng = seeded_rng(&config);
        Self::empty_with_rng(config, rng)
    }

    fn empty_with_rng(config: SimConfig, rng: ChaCha8Rng) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            bounds: Bounds::new(config.world.width, config.world.height),
            config,
            prey: Vec::new(),
            predators: Vec::new(),
            food: Vec::new(),
            obstacles: Vec::new(),
            nursery: Nursery::default(),
            food_timer: 0,
            tick: 0,
            history: History::new(),
            commands: VecDeque::new(),
            rng,
            running: true,
            metrics: Metrics::new(),
        })
    }

    /// Advances the world by one tick.
    pub fn tick(&mut self) -> TickReport {
        let started = Instant::now();
        self.tick += 1;

        while let Some(command) = self.commands.pop_front() {
            self.apply(command);
        }

        let prey_before = self.prey.len();
        let predators_before = self.predators.len();

        let prey_deaths = self.update_prey();
        let predator_deaths = self.update_predators();
        self.commit_births();

        let food_eaten = self.prey_feed();
        let prey_eaten = self.predators_feed();
        let food_spawned = self.spawn_food();

        let births = self.nursery.counters;
        self.history.record(HistorySample {
            tick: self.tick,
            prey: self.prey.len(),
            predators: self.predators.len(),
            prey_births_total: births.prey_total,
            predator_births_total: births.predator_total,
            food: self.food.len(),
            prey_births: births.prey_tick,
            predator_births: births.predator_tick,
        });
        // Reset after sampling so births outside the tick land in the next sample.
        self.nursery.counters.reset_tick();

        self.metrics
            .add_to_counter("prey_deaths", (prey_deaths + prey_eaten) as u64);
        self.metrics
            .add_to_counter("predator_deaths", predator_deaths as u64);
        self.metrics
            .add_to_counter("births", births.prey_tick + births.predator_tick);
        self.metrics.record_tick(
            started.elapsed(),
            self.prey.len(),
            self.predators.len(),
            self.food.len(),
        );
        if prey_before > 0 && self.prey.is_empty() {
            self.metrics.log_event("extinction", "prey");
        }
        if predators_before > 0 && self.predators.is_empty() {
            self.metrics.log_event("extinction", "predator");
        }

        if cfg!(debug_assertions) {
            if let Err(violation) = self.check_invariants() {
                tracing::error!(tick = self.tick, %violation, "Invariant violated");
            }
        }

        TickReport {
            tick: self.tick,
            prey_births: births.prey_tick,
            predator_births: births.predator_tick,
            prey_deaths,
            predator_deaths,
            food_eaten,
            prey_eaten,
            food_spawned,
        }
    }

    /// Same as [`tick`](Self::tick).
    pub fn step(&mut self) -> TickReport {
        self.tick()
    }

    fn update_prey(&mut self) -> usize {
        let mut ctx = PassContext::new(
            &self.config,
            &self.obstacles,
            &mut self.rng,
            &mut self.nursery,
            &self.prey,
        );
        for i in 0..self.prey.len() {
            if ctx.is_dead(&self.prey[i].id) {
                continue;
            }
            prey::update(&mut self.prey, i, &self.predators, &self.food, &mut ctx);
        }
        let dead = ctx.into_dead();
        self.prey.retain(|a| !dead.contains(&a.id));
        dead.len()
    }

    fn update_predators(&mut self) -> usize {
        let mut ctx = PassContext::new(
            &self.config,
            &self.obstacles,
            &mut self.rng,
            &mut self.nursery,
            &self.predators,
        );
        for i in 0..self.predators.len() {
            if ctx.is_dead(&self.predators[i].id) {
                continue;
            }
            predator::update(&mut self.predators, i, &self.prey, &mut ctx);
        }
        let dead = ctx.into_dead();
        self.predators.retain(|a| !dead.contains(&a.id));
        dead.len()
    }

    fn commit_births(&mut self) {
        for child in self.nursery.take_pending() {
            self.push_agent(child);
        }
    }

    /// Each prey eats the first pellet within its eat range.
    fn prey_feed(&mut self) -> usize {
        let params = &self.config.prey;
        let mut eaten = 0;
        for agent in &mut self.prey {
            let here = agent.position;
            let Some(k) = self
                .food
                .iter()
                .position(|f| here.distance(f.position) < params.eat_range)
            else {
                continue;
            };
            self.food.remove(k);
            agent.feed(params.eat_gain);
            eaten += 1;
            tracing::trace!(id = %agent.id, energy = agent.energy, "Prey fed");
        }
        eaten
    }

    /// Each predator eats the first live prey within its eat range; the
    /// victim's mating partner is released.
    fn predators_feed(&mut self) -> usize {
        let params = &self.config.predator;
        let mut eaten: HashSet<Uuid> = HashSet::new();

        for hunter in &mut self.predators {
            let here = hunter.position;
            let Some(v) = self.prey.iter().position(|q| {
                !eaten.contains(&q.id) && here.distance(q.position) < params.eat_range
            }) else {
                continue;
            };
            let victim = &mut self.prey[v];
            let victim_id = victim.id;
            let partner = victim.mating_partner.take();
            victim.mating_timer = 0;
            eaten.insert(victim_id);
            if let Some(partner) = partner {
                if let Some(mate) = self.prey.iter_mut().find(|q| q.id == partner) {
                    mate.abandon_mating();
                }
            }
            hunter.feed(params.eat_gain);
            tracing::debug!(
                predator = %hunter.id,
                prey = %victim_id,
                energy = hunter.energy,
                "Prey eaten"
            );
        }

        if !eaten.is_empty() {
            self.prey.retain(|q| !eaten.contains(&q.id));
        }
        eaten.len()
    }

    /// Periodic food drop, capped at `max_food`.
    fn spawn_food(&mut self) -> usize {
        let world = &self.config.world;
        self.food_timer += 1;
        if self.food_timer < world.food_spawn_interval {
            return 0;
        }
        self.food_timer = 0;
        if self.food.len() >= world.max_food {
            return 0;
        }
        let wanted = self
            .rng
            .gen_range(world.food_spawn_min..=world.food_spawn_max);
        let n = wanted.min(world.max_food - self.food.len());
        for _ in 0..n {
            self.food.push(create_food(self.bounds, &mut self.rng));
        }
        n
    }

    /// Creates one child of `species` between two parent positions, counts the
    /// birth and adds the child to its population immediately.
    pub fn spawn_child(&mut self, species: Species, parent1: DVec2, parent2: DVec2) -> Uuid {
        let id = self
            .nursery
            .spawn_child(species, parent1, parent2, &self.config, &mut self.rng);
        self.commit_births();
        id
    }

    /// Queues a command for the start of the next tick.
    pub fn queue(&mut self, command: SimCommand) {
        self.commands.push_back(command);
    }

    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Executes a command right away.
    pub fn apply(&mut self, command: SimCommand) {
        tracing::debug!(?command, tick = self.tick, "Applying command");
        match command {
            SimCommand::AddPrey => {
                self.add_prey();
            }
            SimCommand::AddPredator => {
                self.add_predator();
            }
            SimCommand::AddFood(n) => self.add_food(n),
            SimCommand::AddObstacle => self.add_obstacle(),
            SimCommand::RemoveObstacle => {
                self.remove_obstacle();
            }
        }
    }

    pub fn add_prey(&mut self) -> Uuid {
        let agent = create_random_agent(Species::Prey, &self.config, &mut self.rng);
        let id = agent.id;
        self.prey.push(agent);
        id
    }

    pub fn add_predator(&mut self) -> Uuid {
        let agent = create_random_agent(Species::Predator, &self.config, &mut self.rng);
        let id = agent.id;
        self.predators.push(agent);
        id
    }

    /// Drops `n` pellets at random positions. Not subject to `max_food`.
    pub fn add_food(&mut self, n: usize) {
        for _ in 0..n {
            self.food.push(create_food(self.bounds, &mut self.rng));
        }
    }

    pub fn add_obstacle(&mut self) {
        let obstacle = create_obstacle(self.config.world.obstacle_radius, self.bounds, &mut self.rng);
        self.obstacles.push(obstacle);
    }

    /// Removes the most recently added obstacle; `None` when there is none.
    pub fn remove_obstacle(&mut self) -> Option<Obstacle> {
        self.obstacles.pop()
    }

    /// Places a fresh agent of `species` at `position` (clamped onto the plane).
    pub fn spawn_at(&mut self, species: Species, position: DVec2) -> Uuid {
        let agent = create_agent_with_rng(species, self.bounds.clamp(position), &self.config, &mut self.rng);
        let id = agent.id;
        self.push_agent(agent);
        id
    }

    /// Adds a fully built agent to the population of its species.
    ///
    /// Rejects an agent whose id is already live or that names itself as its
    /// mating partner.
    pub fn insert_agent(&mut self, agent: Agent) -> Result<(), InvariantViolation> {
        let (species, id) = (agent.species, agent.id);
        if agent.mating_partner == Some(id) {
            return Err(InvariantViolation::SelfPartner { species, id });
        }
        if self.agent(id).is_some() {
            return Err(InvariantViolation::DuplicateId { species, id });
        }
        self.push_agent(agent);
        Ok(())
    }

    fn push_agent(&mut self, agent: Agent) {
        match agent.species {
            Species::Prey => self.prey.push(agent),
            Species::Predator => self.predators.push(agent),
        }
    }

    pub fn insert_food(&mut self, food: Food) {
        self.food.push(food);
    }

    pub fn insert_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Looks an agent up by id in both populations.
    #[must_use]
    pub fn agent(&self, id: Uuid) -> Option<&Agent> {
        self.prey
            .iter()
            .chain(self.predators.iter())
            .find(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: Uuid) -> Option<&mut Agent> {
        self.prey
            .iter_mut()
            .chain(self.predators.iter_mut())
            .find(|a| a.id == id)
    }

    #[must_use]
    pub fn prey(&self) -> &[Agent] {
        &self.prey
    }

    #[must_use]
    pub fn predators(&self) -> &[Agent] {
        &self.predators
    }

    /// Mutable view of the prey, for scenario setup. Agents cannot be added
    /// or removed through it.
    pub fn prey_mut(&mut self) -> &mut [Agent] {
        &mut self.prey
    }

    pub fn predators_mut(&mut self) -> &mut [Agent] {
        &mut self.predators
    }

    #[must_use]
    pub fn food(&self) -> &[Food] {
        &self.food
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Birth totals; the per-tick fields cover births since the last sample.
    #[must_use]
    pub fn births(&self) -> BirthCounters {
        self.nursery.counters
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Clears the running flag; the driving loop stops at its next check.
    pub fn stop(&mut self) {
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Both populations are gone.
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.prey.is_empty() && self.predators.is_empty()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        invariants::check(&self.prey, &self.predators, self.bounds)
    }
}

fn seeded_rng(config: &SimConfig) -> ChaCha8Rng {
    match config.world.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
