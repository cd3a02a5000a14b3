//! Plain data records shared by the ecosim engine and its collaborators.
//!
//! Nothing in this crate draws random numbers or knows about the tick
//! pipeline; behaviour lives in `ecosim_core`.

pub mod data;

pub use data::*;
