mod common;

use common::{AgentBuilder, SimBuilder};
use ecosim_lib::model::command::SimCommand;
use ecosim_lib::model::config::SimConfig;
use ecosim_lib::model::Simulation;

#[test]
fn test_obstacle_centred_on_agent_pushes_it_out() {
    let prey = AgentBuilder::prey().at(400.0, 300.0).build();
    let id = prey.id;
    let mut sim = SimBuilder::new()
        .with_obstacle(400.0, 300.0, 30.0)
        .with_agent(prey)
        .build();

    sim.tick();

    let agent = sim.agent(id).unwrap();
    let centre = sim.obstacles()[0].position;
    assert!(agent.position.is_finite());
    assert!(agent.velocity.is_finite());
    assert!(agent.position.distance(centre) > 30.0);
    assert_invariants!(sim);
}

#[test]
fn test_periodic_food_never_exceeds_cap() {
    let mut sim = SimBuilder::new().build();
    sim.add_food(290);

    for _ in 0..900 {
        sim.tick();
    }

    assert!(sim.history().food_counts().iter().all(|&n| n <= 300));
    assert_eq!(sim.food().len(), 300);
}

#[test]
fn test_food_spawns_on_interval_only() {
    let mut sim = SimBuilder::new().build();
    for tick in 1..=90u64 {
        let report = sim.tick();
        if tick % 30 == 0 {
            assert!((1..=4).contains(&report.food_spawned), "tick {tick}");
        } else {
            assert_eq!(report.food_spawned, 0, "tick {tick}");
        }
    }
}

#[test]
fn test_history_birth_deltas_match_totals() {
    let mut config = SimConfig::default();
    config.world.seed = Some(3);
    let mut sim = Simulation::new(config).unwrap();

    for _ in 0..600 {
        sim.tick();
    }

    let history = sim.history();
    assert_eq!(history.len(), 600);
    let mut prev_prey = 0;
    let mut prev_pred = 0;
    for (i, sample) in history.iter().enumerate() {
        assert_eq!(sample.tick, i as u64 + 1);
        assert_eq!(sample.prey_births, sample.prey_births_total - prev_prey);
        assert_eq!(sample.predator_births, sample.predator_births_total - prev_pred);
        prev_prey = sample.prey_births_total;
        prev_pred = sample.predator_births_total;
    }
    assert_eq!(history.prey_counts().last().copied(), Some(sim.prey().len()));
}

#[test]
fn test_commands_are_not_births() {
    let mut sim = SimBuilder::new().build();
    sim.queue(SimCommand::AddPrey);
    sim.queue(SimCommand::AddPrey);
    sim.queue(SimCommand::AddPredator);
    sim.queue(SimCommand::AddFood(10));

    sim.tick();

    let sample = sim.history().latest().copied().unwrap();
    assert_eq!(sample.prey_births, 0);
    assert_eq!(sample.prey_births_total, 0);
    assert_eq!(sample.predator_births_total, 0);
    assert_eq!(sim.predators().len(), 1);
    assert!(sim.food().len() >= 8);
}

#[test]
fn test_obstacle_commands() {
    let mut sim = SimBuilder::new().build();
    sim.queue(SimCommand::RemoveObstacle);
    sim.queue(SimCommand::AddObstacle);
    sim.queue(SimCommand::AddObstacle);
    sim.queue(SimCommand::RemoveObstacle);
    sim.tick();

    assert_eq!(sim.obstacles().len(), 1);
    let obstacle = sim.obstacles()[0];
    assert_eq!(obstacle.radius, 30.0);
    assert!(obstacle.position.x >= 30.0 && obstacle.position.x <= 770.0);
    assert!(obstacle.position.y >= 30.0 && obstacle.position.y <= 570.0);
}

#[test]
fn test_agents_bounce_off_edges() {
    let prey = AgentBuilder::prey().at(799.0, 300.0).heading(1.0, 0.0).build();
    let id = prey.id;
    let mut sim = SimBuilder::new().with_agent(prey).build();

    sim.tick();

    let agent = sim.agent(id).unwrap();
    assert_eq!(agent.position.x, 800.0);
    assert!(agent.velocity.x < 0.0);
}
