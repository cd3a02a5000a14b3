//! Prey behaviour: flocking, fleeing, foraging and mate-seeking.

use super::mating::{seek_mate, step_mating, MatingStep};
use super::{metabolize, AgentOutcome, PassContext};
use crate::motion::{advance, nearest};
use crate::vector::{safe_normalize, weighted};
use ecosim_data::{Agent, DVec2, Food};
use rand::Rng;

/// Runs one tick of `prey[i]`.
///
/// Upkeep first, then the mating timer (which ends the tick while it runs).
/// A free prey steers with the flock, lets a nearby predator or, when hungry,
/// nearby food override that heading, looks for a mate and finally moves.
pub fn update<R: Rng>(
    prey: &mut [Agent],
    i: usize,
    predators: &[Agent],
    food: &[Food],
    ctx: &mut PassContext<'_, R>,
) -> AgentOutcome {
    let config = ctx.config;
    if !metabolize(prey, i, config.prey.upkeep, ctx) {
        return AgentOutcome::Died;
    }

    match step_mating(prey, i, ctx) {
        MatingStep::Idle => {}
        MatingStep::Waiting => return AgentOutcome::Mating,
        MatingStep::Reproduced => return AgentOutcome::Reproduced,
    }

    if prey[i].reproduction_cooldown > 0 {
        prey[i].reproduction_cooldown -= 1;
    }

    flock(prey, i, ctx);
    react(&mut prey[i], predators, food, ctx);
    seek_mate(prey, i, ctx);

    advance(&mut prey[i], ctx.obstacles, ctx.bounds, &mut *ctx.rng);
    AgentOutcome::Moved
}

/// Steers `prey[i]` with its live neighbours and sets its speed from the
/// flock size. Returns the number of neighbours.
///
/// Alignment and cohesion use every neighbour within `neighbor_radius`;
/// separation only those within `separation_radius`, weighted by inverse
/// distance. A prey with no neighbours keeps its heading and speed.
pub fn flock<R: Rng>(prey: &mut [Agent], i: usize, ctx: &mut PassContext<'_, R>) -> usize {
    let config = ctx.config;
    let f = &config.flocking;
    let me = &prey[i];

    let mut alignment = DVec2::ZERO;
    let mut cohesion = DVec2::ZERO;
    let mut separation = DVec2::ZERO;
    let mut total = 0usize;

    for (_, other) in ctx.live_others(prey, i) {
        let dist = me.position.distance(other.position);
        if dist >= f.neighbor_radius {
            continue;
        }
        alignment += other.velocity;
        cohesion += other.position;
        total += 1;
        if dist < f.separation_radius {
            let diff = me.position - other.position;
            if diff != DVec2::ZERO {
                separation += diff / dist;
            }
        }
    }

    if total == 0 {
        return 0;
    }

    let centroid = cohesion / total as f64;
    let force = weighted(alignment, f.alignment_weight)
        + weighted(centroid - me.position, f.cohesion_weight)
        + weighted(separation, f.separation_weight);

    let agent = &mut prey[i];
    if force != DVec2::ZERO {
        agent.velocity = safe_normalize(agent.velocity + force * f.steering_factor, &mut *ctx.rng);
    }
    agent.speed = if total > f.large_flock_size {
        f.large_flock_speed
    } else if total > f.medium_flock_size {
        f.medium_flock_speed
    } else {
        config.prey.speed
    };
    total
}

/// Overrides the flocking heading: flee the nearest predator in sight, or,
/// when hungry and unthreatened, head for the nearest food in range.
fn react<R: Rng>(agent: &mut Agent, predators: &[Agent], food: &[Food], ctx: &mut PassContext<'_, R>) {
    let config = ctx.config;
    let f = &config.flocking;
    let here = agent.position;

    let threat = nearest(
        here,
        predators.iter().map(|p| p.position).enumerate(),
        f.vision_radius,
    );
    if let Some(p) = threat {
        agent.velocity = safe_normalize(here - predators[p].position, &mut *ctx.rng);
        return;
    }

    if agent.energy < f.hunger_threshold {
        let meal = nearest(
            here,
            food.iter().map(|m| m.position).enumerate(),
            f.forage_radius,
        );
        if let Some(m) = meal {
            agent.velocity = safe_normalize(food[m].position - here, &mut *ctx.rng);
        }
    }
}
