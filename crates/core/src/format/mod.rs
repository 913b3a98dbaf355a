//! Presentation helpers for rendering calculator output.

mod number_format;

pub use number_format::{format_currency, format_number, format_percent, NumberLocale};
