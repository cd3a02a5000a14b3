//! Movement on the bounded plane and obstacle avoidance.

use crate::vector::random_unit;
use ecosim_data::{Agent, DVec2, Obstacle};
use rand::Rng;

/// Velocity nudge applied along the push direction after an obstacle contact.
pub const AVOIDANCE_NUDGE: f64 = 0.05;

/// The plane `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    #[must_use]
    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    #[must_use]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Uniformly random point on the plane.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> DVec2 {
        DVec2::new(
            rng.gen_range(0.0..=self.width),
            rng.gen_range(0.0..=self.height),
        )
    }
}

/// Moves `agent` one tick along its heading and resolves contacts.
///
/// Order: integrate, reflect off the edges, push out of obstacles, record the
/// trail. The final position is always inside `bounds`.
pub fn advance<R: Rng + ?Sized>(
    agent: &mut Agent,
    obstacles: &[Obstacle],
    bounds: Bounds,
    rng: &mut R,
) {
    agent.position += agent.velocity * agent.speed;
    reflect_off_edges(agent, bounds);
    avoid_obstacles(agent, obstacles, rng);
    // An obstacle hugging the edge can push the agent off the plane.
    agent.position = bounds.clamp(agent.position);
    agent.record_trail();
}

/// Reflects the velocity component of every axis on which the agent left the
/// plane, then clamps the position back in.
///
/// Only an outward-pointing component is flipped, so an agent already turned
/// back toward the plane is never sent outward again.
pub fn reflect_off_edges(agent: &mut Agent, bounds: Bounds) {
    let p = agent.position;
    let v = &mut agent.velocity;
    if (p.x < 0.0 && v.x < 0.0) || (p.x > bounds.width && v.x > 0.0) {
        v.x = -v.x;
    }
    if (p.y < 0.0 && v.y < 0.0) || (p.y > bounds.height && v.y > 0.0) {
        v.y = -v.y;
    }
    agent.position = bounds.clamp(p);
}

/// Pushes the agent out of every obstacle it overlaps.
///
/// Obstacles are handled one after another, each seeing the position left by
/// the previous one. A contact removes the inward part of the velocity and
/// adds a small outward nudge. An agent that overlaps nothing is untouched.
pub fn avoid_obstacles<R: Rng + ?Sized>(agent: &mut Agent, obstacles: &[Obstacle], rng: &mut R) {
    for obs in obstacles {
        let offset = agent.position - obs.position;
        let dist = offset.length();
        let min_dist = agent.radius + obs.radius;
        if dist >= min_dist {
            continue;
        }

        let push = if dist == 0.0 {
            random_unit(rng)
        } else {
            offset / dist
        };
        agent.position += push * (min_dist - dist);

        let inward = agent.velocity.dot(push);
        if inward < 0.0 {
            agent.velocity -= push * inward;
        }
        agent.velocity += push * AVOIDANCE_NUDGE;
        if let Some(v) = agent.velocity.try_normalize() {
            agent.velocity = v;
        }
    }
}

/// Index of the candidate closest to `origin` with distance strictly below
/// `max_dist`. Ties keep the earliest candidate.
pub fn nearest<I>(origin: DVec2, candidates: I, max_dist: f64) -> Option<usize>
where
    I: IntoIterator<Item = (usize, DVec2)>,
{
    let mut best = None;
    let mut best_dist = max_dist;
    for (idx, pos) in candidates {
        let d = origin.distance(pos);
        if d < best_dist {
            best_dist = d;
            best = Some(idx);
        }
    }
    best
}
