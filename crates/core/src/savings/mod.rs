//! Savings module - calculator input/result models and the calculation steps.

mod savings_calculator;
mod savings_model;

pub use savings_calculator::*;
pub use savings_model::*;
