//! Settings module - configurable simulation defaults.

mod simulation_defaults;

pub use simulation_defaults::*;
