//! Structural checks over the live populations.
//!
//! None of these can fail in a correct engine; the simulation runs them after
//! every tick in debug builds and tests call them directly.

use crate::motion::Bounds;
use ecosim_data::{Agent, DVec2, Species, TRAIL_LENGTH};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("{species} {id}: energy {energy} outside [0, {max}]")]
    EnergyOutOfRange {
        species: Species,
        id: Uuid,
        energy: f64,
        max: f64,
    },
    #[error("{species} {id}: position ({x}, {y}) outside the plane")]
    OutOfBounds {
        species: Species,
        id: Uuid,
        x: f64,
        y: f64,
    },
    #[error("{species} {id}: trail holds {len} points")]
    TrailTooLong { species: Species, id: Uuid, len: usize },
    #[error("{species} {id}: velocity is zero or not finite")]
    DegenerateVelocity { species: Species, id: Uuid },
    #[error("{species} {id}: id is not unique")]
    DuplicateId { species: Species, id: Uuid },
    #[error("{species} {id}: listed as its own mating partner")]
    SelfPartner { species: Species, id: Uuid },
    #[error("{species} {id}: partner {partner} is not a live {species}")]
    DanglingPartner {
        species: Species,
        id: Uuid,
        partner: Uuid,
    },
    #[error("{species} {id}: partner {partner} does not point back")]
    AsymmetricPartner {
        species: Species,
        id: Uuid,
        partner: Uuid,
    },
}

/// Checks every agent of both populations, returning the first violation.
pub fn check(prey: &[Agent], predators: &[Agent], bounds: Bounds) -> Result<(), InvariantViolation> {
    check_population(prey, bounds)?;
    check_population(predators, bounds)
}

fn check_population(agents: &[Agent], bounds: Bounds) -> Result<(), InvariantViolation> {
    let mut by_id: HashMap<Uuid, &Agent> = HashMap::with_capacity(agents.len());
    for a in agents {
        if by_id.insert(a.id, a).is_some() {
            return Err(InvariantViolation::DuplicateId {
                species: a.species,
                id: a.id,
            });
        }
    }

    for a in agents {
        let (species, id) = (a.species, a.id);
        if !(0.0..=a.max_energy).contains(&a.energy) {
            return Err(InvariantViolation::EnergyOutOfRange {
                species,
                id,
                energy: a.energy,
                max: a.max_energy,
            });
        }
        if !bounds.contains(a.position) {
            return Err(InvariantViolation::OutOfBounds {
                species,
                id,
                x: a.position.x,
                y: a.position.y,
            });
        }
        if a.trail.len() > TRAIL_LENGTH {
            return Err(InvariantViolation::TrailTooLong {
                species,
                id,
                len: a.trail.len(),
            });
        }
        if !a.velocity.is_finite() || a.velocity == DVec2::ZERO {
            return Err(InvariantViolation::DegenerateVelocity { species, id });
        }
        if let Some(partner) = a.mating_partner {
            if partner == id {
                return Err(InvariantViolation::SelfPartner { species, id });
            }
            match by_id.get(&partner) {
                Some(p) if p.species == species => {
                    if p.mating_partner != Some(id) {
                        return Err(InvariantViolation::AsymmetricPartner { species, id, partner });
                    }
                }
                _ => return Err(InvariantViolation::DanglingPartner { species, id, partner }),
            }
        }
    }
    Ok(())
}
