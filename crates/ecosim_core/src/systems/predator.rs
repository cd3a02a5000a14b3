//! Predator behaviour: hunting, random wander and mate-seeking.

use super::mating::{seek_mate, step_mating, MatingStep};
use super::{metabolize, AgentOutcome, PassContext};
use crate::motion::{advance, nearest};
use crate::vector::safe_normalize;
use ecosim_data::{Agent, DVec2};
use rand::Rng;

/// Runs one tick of `predators[i]`.
///
/// Same skeleton as prey minus flocking: upkeep, mating timer, cooldown,
/// hunt (or wander), mate-seeking, movement.
pub fn update<R: Rng>(
    predators: &mut [Agent],
    i: usize,
    prey: &[Agent],
    ctx: &mut PassContext<'_, R>,
) -> AgentOutcome {
    let config = ctx.config;
    if !metabolize(predators, i, config.predator.upkeep, ctx) {
        return AgentOutcome::Died;
    }

    match step_mating(predators, i, ctx) {
        MatingStep::Idle => {}
        MatingStep::Waiting => return AgentOutcome::Mating,
        MatingStep::Reproduced => return AgentOutcome::Reproduced,
    }

    if predators[i].reproduction_cooldown > 0 {
        predators[i].reproduction_cooldown -= 1;
    }

    hunt(&mut predators[i], prey, ctx);
    seek_mate(predators, i, ctx);

    advance(&mut predators[i], ctx.obstacles, ctx.bounds, &mut *ctx.rng);
    AgentOutcome::Moved
}

/// Turns toward the nearest prey within `hunt_radius` and returns its index.
///
/// With no prey in range the heading occasionally drifts by a small random
/// offset instead.
pub fn hunt<R: Rng>(agent: &mut Agent, prey: &[Agent], ctx: &mut PassContext<'_, R>) -> Option<usize> {
    let config = ctx.config;
    let h = &config.hunting;
    let here = agent.position;

    let target = nearest(
        here,
        prey.iter().map(|p| p.position).enumerate(),
        h.hunt_radius,
    );
    match target {
        Some(t) => {
            agent.velocity = safe_normalize(prey[t].position - here, &mut *ctx.rng);
        }
        None => {
            if ctx.rng.gen::<f64>() < h.wander_chance {
                let s = h.wander_strength;
                let nudge = DVec2::new(ctx.rng.gen_range(-s..=s), ctx.rng.gen_range(-s..=s));
                agent.velocity = safe_normalize(agent.velocity + nudge, &mut *ctx.rng);
            }
        }
    }
    target
}
