//! Greensave Core - savings and emissions calculator.
//!
//! This crate turns the commercial parameters of a green energy offer (current
//! bill, discount, coverage, tariff, emission factors) into the monetary and
//! environmental figures shown to a customer. It performs no I/O and holds no
//! state between calls; the presentation helpers in [`format`] and [`report`]
//! only consume the calculator's output.

pub mod constants;
pub mod errors;
pub mod format;
pub mod report;
pub mod savings;
pub mod settings;

pub use savings::{compute, CalculationInput, CalculationResult};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
