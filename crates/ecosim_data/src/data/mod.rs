//! Core data structures for the ecosim simulation.

pub mod entity;
pub mod history;
pub mod terrain;

pub use entity::{Agent, Species, AGENT_RADIUS, TRAIL_LENGTH};
pub use history::HistorySample;
pub use terrain::{Food, Obstacle, FOOD_RADIUS, OBSTACLE_RADIUS};
pub use glam::DVec2;
