//! Headless front end for the Ecosim engine: configuration loading, the run
//! loop and scenario key handling.

pub mod app;
pub mod model;
