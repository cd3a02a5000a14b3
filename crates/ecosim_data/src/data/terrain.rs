use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Radius of every food pellet.
pub const FOOD_RADIUS: f64 = 3.0;

/// Radius of obstacles placed by the add-obstacle command.
pub const OBSTACLE_RADIUS: f64 = 30.0;

/// Food pellet eaten by prey.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: DVec2,
    pub radius: f64,
}

impl Food {
    #[must_use]
    pub fn new(position: DVec2) -> Self {
        Self {
            position,
            radius: FOOD_RADIUS,
        }
    }
}

/// Static disc that agents are pushed out of.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: DVec2,
    pub radius: f64,
}

impl Obstacle {
    #[must_use]
    pub fn new(position: DVec2, radius: f64) -> Self {
        Self { position, radius }
    }

    /// True when a disc of `radius` at `point` overlaps this obstacle.
    #[must_use]
    pub fn overlaps(&self, point: DVec2, radius: f64) -> bool {
        point.distance(self.position) < self.radius + radius
    }
}
