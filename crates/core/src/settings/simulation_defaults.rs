//! Default simulation parameters.
//!
//! Presentation layers pre-fill their forms from these values and merge them
//! with whatever the user supplies. The calculator never reads them on its own.

use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_AVG_TARIFF, DEFAULT_BILL_AMOUNT, DEFAULT_COVERAGE_PCT, DEFAULT_DISCOUNT_PCT,
    DEFAULT_GRID_EMISSION_FACTOR, DEFAULT_PERIOD_MONTHS, DEFAULT_POINT_VALUE,
    DEFAULT_VARIABLE_SHARE_PCT,
};
use crate::errors::{Error, Result};
use crate::savings::{CalculationInput, CoverageBase, SavedEnergyMode};

pub const KEY_BILL_AMOUNT: &str = "GS_DEFAULT_BILL_AMOUNT";
pub const KEY_DISCOUNT_PCT: &str = "GS_DEFAULT_DISCOUNT_PCT";
pub const KEY_COVERAGE_PCT: &str = "GS_DEFAULT_COVERAGE_PCT";
pub const KEY_VARIABLE_SHARE_PCT: &str = "GS_DEFAULT_VARIABLE_SHARE_PCT";
pub const KEY_PERIOD_MONTHS: &str = "GS_DEFAULT_PERIOD_MONTHS";
pub const KEY_AVG_TARIFF: &str = "GS_DEFAULT_AVG_TARIFF";
pub const KEY_GRID_EMISSION_FACTOR: &str = "GS_DEFAULT_GRID_EMISSION_FACTOR";
pub const KEY_GREEN_EMISSION_FACTOR: &str = "GS_DEFAULT_GREEN_EMISSION_FACTOR";
pub const KEY_COVERAGE_BASE: &str = "GS_DEFAULT_COVERAGE_BASE";
pub const KEY_SAVED_ENERGY_MODE: &str = "GS_DEFAULT_SAVED_ENERGY_MODE";
pub const KEY_POINT_VALUE: &str = "GS_DEFAULT_POINT_VALUE";

/// Values a new simulation starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDefaults {
    pub bill_amount: Decimal,
    pub discount_pct: Decimal,
    pub coverage_pct: Decimal,
    pub variable_share_pct: Decimal,
    pub period_months: u32,
    pub avg_tariff: Decimal,
    pub grid_emission_factor: Decimal,
    pub green_emission_factor: Option<Decimal>,
    pub coverage_base: CoverageBase,
    pub saved_energy_mode: SavedEnergyMode,
    pub point_value: Option<Decimal>,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            bill_amount: DEFAULT_BILL_AMOUNT,
            discount_pct: DEFAULT_DISCOUNT_PCT,
            coverage_pct: DEFAULT_COVERAGE_PCT,
            variable_share_pct: DEFAULT_VARIABLE_SHARE_PCT,
            period_months: DEFAULT_PERIOD_MONTHS,
            avg_tariff: DEFAULT_AVG_TARIFF,
            grid_emission_factor: DEFAULT_GRID_EMISSION_FACTOR,
            green_emission_factor: None,
            coverage_base: CoverageBase::FullBill,
            saved_energy_mode: SavedEnergyMode::TariffDivision,
            point_value: Some(DEFAULT_POINT_VALUE),
        }
    }
}

impl SimulationDefaults {
    /// Builds the defaults from a key lookup, falling back to the built-in
    /// value for every key that is missing or blank.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`. Optional factors
    /// accept `none`/`off` to disable them explicitly.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            bill_amount: parse_or(read(KEY_BILL_AMOUNT), KEY_BILL_AMOUNT, base.bill_amount)?,
            discount_pct: parse_or(read(KEY_DISCOUNT_PCT), KEY_DISCOUNT_PCT, base.discount_pct)?,
            coverage_pct: parse_or(read(KEY_COVERAGE_PCT), KEY_COVERAGE_PCT, base.coverage_pct)?,
            variable_share_pct: parse_or(
                read(KEY_VARIABLE_SHARE_PCT),
                KEY_VARIABLE_SHARE_PCT,
                base.variable_share_pct,
            )?,
            period_months: parse_or(read(KEY_PERIOD_MONTHS), KEY_PERIOD_MONTHS, base.period_months)?,
            avg_tariff: parse_or(read(KEY_AVG_TARIFF), KEY_AVG_TARIFF, base.avg_tariff)?,
            grid_emission_factor: parse_or(
                read(KEY_GRID_EMISSION_FACTOR),
                KEY_GRID_EMISSION_FACTOR,
                base.grid_emission_factor,
            )?,
            green_emission_factor: parse_optional_or(
                read(KEY_GREEN_EMISSION_FACTOR),
                KEY_GREEN_EMISSION_FACTOR,
                base.green_emission_factor,
            )?,
            coverage_base: parse_or(read(KEY_COVERAGE_BASE), KEY_COVERAGE_BASE, base.coverage_base)?,
            saved_energy_mode: parse_or(
                read(KEY_SAVED_ENERGY_MODE),
                KEY_SAVED_ENERGY_MODE,
                base.saved_energy_mode,
            )?,
            point_value: parse_optional_or(
                read(KEY_POINT_VALUE),
                KEY_POINT_VALUE,
                base.point_value,
            )?,
        })
    }

    /// Turns the defaults into a calculator input.
    pub fn to_input(&self) -> CalculationInput {
        CalculationInput {
            bill_amount: self.bill_amount,
            discount_pct: self.discount_pct,
            coverage_pct: self.coverage_pct,
            variable_share_pct: self.variable_share_pct,
            period_months: self.period_months,
            avg_tariff: self.avg_tariff,
            grid_emission_factor: self.grid_emission_factor,
            green_emission_factor: self.green_emission_factor,
            coverage_base: self.coverage_base,
            saved_energy_mode: self.saved_energy_mode,
            point_value: self.point_value,
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, fallback: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| Error::config(key, e)),
        None => Ok(fallback),
    }
}

fn parse_optional_or(
    raw: Option<String>,
    key: &str,
    fallback: Option<Decimal>,
) -> Result<Option<Decimal>> {
    match raw.as_deref() {
        Some(value) if is_disabled(value) => Ok(None),
        Some(value) => {
            let parsed = Decimal::from_str(value).map_err(|e| Error::config(key, e))?;
            if parsed <= Decimal::ZERO {
                warn!("{} is not positive ({}), treating it as disabled", key, parsed);
                return Ok(None);
            }
            Ok(Some(parsed))
        }
        None => Ok(fallback),
    }
}

fn is_disabled(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "none" | "off" | "disabled"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_lookup_yields_defaults() {
        let defaults = SimulationDefaults::from_lookup(|_| None).unwrap();
        assert_eq!(defaults, SimulationDefaults::default());
    }

    #[test]
    fn test_lookup_overrides_values() {
        let defaults = SimulationDefaults::from_lookup(lookup_from(&[
            (KEY_VARIABLE_SHARE_PCT, "80"),
            (KEY_COVERAGE_BASE, "variable-portion"),
            (KEY_SAVED_ENERGY_MODE, "CONSUMPTION_SHARE"),
            (KEY_PERIOD_MONTHS, " 24 "),
            (KEY_GREEN_EMISSION_FACTOR, "0.05"),
            (KEY_POINT_VALUE, "off"),
        ]))
        .unwrap();

        assert_eq!(defaults.variable_share_pct, dec!(80));
        assert_eq!(defaults.coverage_base, CoverageBase::VariablePortion);
        assert_eq!(defaults.saved_energy_mode, SavedEnergyMode::ConsumptionShare);
        assert_eq!(defaults.period_months, 24);
        assert_eq!(defaults.green_emission_factor, Some(dec!(0.05)));
        assert_eq!(defaults.point_value, None);
        // untouched keys keep the built-in value
        assert_eq!(defaults.bill_amount, DEFAULT_BILL_AMOUNT);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let defaults =
            SimulationDefaults::from_lookup(lookup_from(&[(KEY_AVG_TARIFF, "   ")])).unwrap();
        assert_eq!(defaults.avg_tariff, DEFAULT_AVG_TARIFF);
    }

    #[test]
    fn test_non_positive_point_value_disables_points() {
        let defaults =
            SimulationDefaults::from_lookup(lookup_from(&[(KEY_POINT_VALUE, "0")])).unwrap();
        assert_eq!(defaults.point_value, None);
    }

    #[test]
    fn test_invalid_value_names_the_key() {
        let err = SimulationDefaults::from_lookup(lookup_from(&[(KEY_DISCOUNT_PCT, "fifteen")]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfigValue { ref key, .. } if key == KEY_DISCOUNT_PCT
        ));
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let err = SimulationDefaults::from_lookup(lookup_from(&[(KEY_COVERAGE_BASE, "half")]))
            .unwrap_err();
        assert!(err.to_string().contains(KEY_COVERAGE_BASE));
    }

    #[test]
    fn test_to_input_carries_every_field() {
        let defaults = SimulationDefaults::default();
        let input = defaults.to_input();
        assert_eq!(input.bill_amount, defaults.bill_amount);
        assert_eq!(input.coverage_base, CoverageBase::FullBill);
        assert_eq!(input.point_value, Some(DEFAULT_POINT_VALUE));
    }
}
