pub mod macros;

use ecosim_core::config::SimConfig;
use ecosim_core::Simulation;
use ecosim_data::{Agent, DVec2, Food, Obstacle, Species};
use uuid::Uuid;

type SimMod = Box<dyn FnOnce(&mut Simulation)>;

/// Builds a world with no initial agents or food, seed 42, then places
/// exactly what the test asks for.
#[allow(dead_code)]
pub struct SimBuilder {
    config: SimConfig,
    agents: Vec<Agent>,
    mods: Vec<SimMod>,
}

#[allow(dead_code)]
impl SimBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.initial_prey = 0;
        config.world.initial_predators = 0;
        config.world.initial_food = 0;
        config.world.seed = Some(42);
        Self {
            config,
            agents: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Disables periodic food drops so energy bookkeeping stays exact.
    pub fn without_food_spawning(mut self) -> Self {
        self.config.world.max_food = 0;
        self
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64) -> Self {
        self.mods.push(Box::new(move |sim| {
            sim.insert_food(Food::new(DVec2::new(x, y)));
        }));
        self
    }

    pub fn with_obstacle(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.mods.push(Box::new(move |sim| {
            sim.insert_obstacle(Obstacle::new(DVec2::new(x, y), radius));
        }));
        self
    }

    pub fn build(self) -> Simulation {
        let mut sim = Simulation::empty(self.config).expect("Failed to create simulation in test builder");
        for modifier in self.mods {
            modifier(&mut sim);
        }
        for agent in self.agents {
            sim.insert_agent(agent)
                .expect("Test builder received an agent with a clashing identity");
        }
        sim
    }
}

/// Agent with default species parameters and explicit state.
#[allow(dead_code)]
pub struct AgentBuilder {
    id: Uuid,
    species: Species,
    position: DVec2,
    velocity: DVec2,
    energy: Option<f64>,
    cooldown: u32,
    partner: Option<(Uuid, u32)>,
}

#[allow(dead_code)]
impl AgentBuilder {
    pub fn prey() -> Self {
        Self::new(Species::Prey)
    }

    pub fn predator() -> Self {
        Self::new(Species::Predator)
    }

    pub fn new(species: Species) -> Self {
        Self {
            id: Uuid::new_v4(),
            species,
            position: DVec2::new(400.0, 300.0),
            velocity: DVec2::new(1.0, 0.0),
            energy: None,
            cooldown: 0,
            partner: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = DVec2::new(x, y);
        self
    }

    pub fn heading(mut self, x: f64, y: f64) -> Self {
        self.velocity = DVec2::new(x, y);
        self
    }

    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Puts the agent mid-mating with `partner`, `timer` ticks left.
    pub fn mating_with(mut self, partner: Uuid, timer: u32) -> Self {
        self.partner = Some((partner, timer));
        self
    }

    pub fn build(self) -> Agent {
        let config = SimConfig::default();
        let params = config.species(self.species);
        let mut agent = Agent::new(
            self.id,
            self.species,
            self.position,
            self.velocity,
            params.speed,
            params.max_energy,
        );
        if let Some(energy) = self.energy {
            agent.energy = energy;
        }
        agent.reproduction_cooldown = self.cooldown;
        if let Some((partner, timer)) = self.partner {
            agent.mating_partner = Some(partner);
            agent.mating_timer = timer;
        }
        agent
    }
}
