pub use ecosim_core::{InvariantViolation, SimCommand, Simulation, TickReport};
pub mod config {
    pub use ecosim_core::config::*;
}
pub mod command {
    pub use ecosim_core::command::*;
}
pub mod history {
    pub use ecosim_core::history::*;
}
pub mod invariants {
    pub use ecosim_core::invariants::*;
}
pub mod lifecycle {
    pub use ecosim_core::lifecycle::*;
}
pub mod metrics {
    pub use ecosim_core::metrics::*;
}
pub mod motion {
    pub use ecosim_core::motion::*;
}
pub mod simulation {
    pub use ecosim_core::simulation::*;
}
pub mod systems {
    pub use ecosim_core::systems::*;
}
pub mod vector {
    pub use ecosim_core::vector::*;
}

pub mod state {
    pub use ecosim_data::*;
}
