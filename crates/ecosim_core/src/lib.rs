//! # Ecosim Core
//!
//! The simulation engine for Ecosim, a predator/prey ecosystem on a bounded
//! 2D plane.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Prey flocking, fleeing and foraging
//! - Predator hunting and wander
//! - Pairwise mating with timers, costs and cooldowns
//! - Obstacle avoidance and edge reflection
//! - Food spawning, population history and invariant checks
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Each population is updated in one pass per tick. Deaths are recorded in a
//! per-pass dead set and compacted at the end of the pass; newborns wait in a
//! [`lifecycle::Nursery`] until both passes are done. All randomness comes
//! from a seedable `ChaCha8Rng`, so a fixed seed reproduces a run exactly.
//!
//! ## Example
//!
//! ```
//! use ecosim_core::config::SimConfig;
//! use ecosim_core::simulation::Simulation;
//!
//! let mut config = SimConfig::default();
//! config.world.seed = Some(42);
//! let mut sim = Simulation::new(config).unwrap();
//! for _ in 0..10 {
//!     sim.tick();
//! }
//! assert_eq!(sim.history().len(), 10);
//! ```

/// Discrete scenario edits (add agents, food, obstacles)
pub mod command;
/// Configuration management for simulation parameters
pub mod config;
/// Append-only population history
pub mod history;
/// Structural checks over the live populations
pub mod invariants;
/// Agent creation, births and birth accounting
pub mod lifecycle;
/// Performance metrics collection and logging
pub mod metrics;
/// Movement on the plane and obstacle avoidance
pub mod motion;
/// The world engine and its tick pipeline
pub mod simulation;
/// Per-species update systems
pub mod systems;
/// Randomized vector helpers
pub mod vector;

pub use command::SimCommand;
pub use config::SimConfig;
pub use invariants::InvariantViolation;
pub use metrics::{init_logging, Metrics};
pub use simulation::{Simulation, TickReport};
