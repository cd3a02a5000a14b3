//! Mating state machine shared by both species.
//!
//! A pair forms when two eligible agents meet; both then wait out the
//! species' mating timer without moving. The first of the two whose timer
//! expires produces the child, charges both parents and starts both cooldowns.

use super::{pair_mut, PassContext};
use ecosim_data::Agent;
use rand::Rng;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatingStep {
    /// Not mating; the agent behaves normally this tick.
    Idle,
    /// Mating (or just finished without a partner); the agent skips the tick.
    Waiting,
    /// A child was born; the agent skips the tick.
    Reproduced,
}

/// Advances the mating timer of `agents[i]`.
///
/// An agent that was paired earlier in the same pass keeps its full timer, so
/// both partners count down in step.
pub fn step_mating<R: Rng>(
    agents: &mut [Agent],
    i: usize,
    ctx: &mut PassContext<'_, R>,
) -> MatingStep {
    if agents[i].mating_timer == 0 {
        return MatingStep::Idle;
    }
    if !ctx.paired_this_pass(&agents[i].id) {
        agents[i].mating_timer -= 1;
    }
    if agents[i].mating_timer > 0 {
        return MatingStep::Waiting;
    }

    let Some(partner) = agents[i].mating_partner else {
        return MatingStep::Waiting;
    };
    match ctx.live_index(&partner).filter(|&j| j != i) {
        Some(j) => {
            reproduce(agents, i, j, ctx);
            MatingStep::Reproduced
        }
        None => {
            agents[i].mating_partner = None;
            MatingStep::Waiting
        }
    }
}

/// Spawns the child of `agents[i]` and `agents[j]` and settles the parents.
fn reproduce<R: Rng>(agents: &mut [Agent], i: usize, j: usize, ctx: &mut PassContext<'_, R>) {
    let config = ctx.config;
    let species = agents[i].species;
    let params = config.species(species);

    let (a, b) = pair_mut(agents, i, j);
    ctx.nursery
        .spawn_child(species, a.position, b.position, config, &mut *ctx.rng);
    for parent in [a, b] {
        parent.energy -= params.reproduction_cost;
        parent.reproduction_cooldown = params.reproduction_cooldown;
        parent.mating_partner = None;
    }

    for k in [i, j] {
        if agents[k].energy <= 0.0 {
            ctx.kill(agents, k, "exhaustion");
        }
    }
}

/// Pairs `agents[i]` with the first eligible live partner in range.
///
/// Eligibility: both above the species' mate threshold, the initiator off
/// cooldown, the candidate not already mating, distance below `mate_range`.
/// The scan stops at the first match rather than looking for the nearest.
pub fn seek_mate<R: Rng>(
    agents: &mut [Agent],
    i: usize,
    ctx: &mut PassContext<'_, R>,
) -> Option<Uuid> {
    let config = ctx.config;
    let params = config.species(agents[i].species);
    let me = &agents[i];
    if me.energy <= params.mate_threshold || me.reproduction_cooldown > 0 {
        return None;
    }

    let j = ctx
        .live_others(agents, i)
        .find(|(_, other)| {
            other.energy > params.mate_threshold
                && other.mating_timer == 0
                && me.position.distance(other.position) < params.mate_range
        })
        .map(|(j, _)| j)?;

    let duration = params.mating_duration;
    let (a, b) = pair_mut(agents, i, j);
    a.mating_partner = Some(b.id);
    a.mating_timer = duration;
    b.mating_partner = Some(a.id);
    b.mating_timer = duration;
    let (a_id, b_id) = (a.id, b.id);

    ctx.mark_paired(a_id);
    ctx.mark_paired(b_id);
    tracing::debug!(species = %agents[i].species, a = %a_id, b = %b_id, "Pair formed");
    Some(b_id)
}
