//! Savings calculator domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_PERCENT, MIN_PERIOD_MONTHS};
use crate::errors::ValidationError;

/// Amount the coverage percentage is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageBase {
    /// Coverage applies to the variable (consumption-based) part of the bill only.
    VariablePortion,

    /// Coverage applies to the whole bill, fixed distributor charges included.
    FullBill,
}

impl CoverageBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageBase::VariablePortion => "VARIABLE_PORTION",
            CoverageBase::FullBill => "FULL_BILL",
        }
    }
}

impl fmt::Display for CoverageBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverageBase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_mode_name(s).as_str() {
            "VARIABLE_PORTION" | "VARIABLE" => Ok(CoverageBase::VariablePortion),
            "FULL_BILL" | "FULL" => Ok(CoverageBase::FullBill),
            _ => Err(ValidationError::InvalidInput(format!(
                "unknown coverage base '{}'",
                s
            ))),
        }
    }
}

/// How the monthly energy saved is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavedEnergyMode {
    /// `monthly_savings / avg_tariff`
    TariffDivision,

    /// `monthly_consumption_kwh * discount * coverage`
    ConsumptionShare,
}

impl SavedEnergyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SavedEnergyMode::TariffDivision => "TARIFF_DIVISION",
            SavedEnergyMode::ConsumptionShare => "CONSUMPTION_SHARE",
        }
    }
}

impl fmt::Display for SavedEnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SavedEnergyMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_mode_name(s).as_str() {
            "TARIFF_DIVISION" | "TARIFF" => Ok(SavedEnergyMode::TariffDivision),
            "CONSUMPTION_SHARE" | "CONSUMPTION" => Ok(SavedEnergyMode::ConsumptionShare),
            _ => Err(ValidationError::InvalidInput(format!(
                "unknown saved energy mode '{}'",
                s
            ))),
        }
    }
}

fn normalize_mode_name(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

/// Commercial and environmental parameters of a single simulation.
///
/// Built fresh for every request. Out-of-range values are accepted here and
/// clamped by [`CalculationInput::normalized`] before any arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Current total electricity bill.
    pub bill_amount: Decimal,
    /// Discount applied to the covered amount, in percent.
    pub discount_pct: Decimal,
    /// Share of the bill supplied by green energy, in percent.
    pub coverage_pct: Decimal,
    /// Share of the bill that is consumption-based, in percent.
    pub variable_share_pct: Decimal,
    pub period_months: u32,
    /// Average tariff per kWh, used to turn money into energy.
    pub avg_tariff: Decimal,
    /// kg CO2e per kWh of grid energy.
    pub grid_emission_factor: Decimal,
    /// kg CO2e per kWh of the green supply. Absent means zero-emission.
    #[serde(default)]
    pub green_emission_factor: Option<Decimal>,
    pub coverage_base: CoverageBase,
    pub saved_energy_mode: SavedEnergyMode,
    /// Currency value of one loyalty point. Absent disables the points metrics.
    #[serde(default)]
    pub point_value: Option<Decimal>,
}

impl CalculationInput {
    /// Returns a copy with every input invariant applied.
    ///
    /// Percentages are clamped into `[0, 100]`, negative amounts, tariffs and
    /// factors become zero, the period is at least one month and a
    /// non-positive point value counts as absent.
    pub fn normalized(&self) -> Self {
        Self {
            bill_amount: non_negative(self.bill_amount),
            discount_pct: clamp_percent(self.discount_pct),
            coverage_pct: clamp_percent(self.coverage_pct),
            variable_share_pct: clamp_percent(self.variable_share_pct),
            period_months: self.period_months.max(MIN_PERIOD_MONTHS),
            avg_tariff: non_negative(self.avg_tariff),
            grid_emission_factor: non_negative(self.grid_emission_factor),
            green_emission_factor: self.green_emission_factor.map(non_negative),
            coverage_base: self.coverage_base,
            saved_energy_mode: self.saved_energy_mode,
            point_value: self.point_value.filter(|value| *value > Decimal::ZERO),
        }
    }
}

/// Clamps a percentage into `[0, 100]`.
pub fn clamp_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_PERCENT)
}

/// Replaces negative values with zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Loyalty points derived from the monthly savings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPoints {
    pub monthly_points: Decimal,
    /// Points whose value equals the whole current bill.
    pub points_to_zero_bill: Decimal,
    /// Points still missing after the monthly points, never negative.
    pub additional_points_needed: Decimal,
}

/// Figures derived from a [`CalculationInput`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub variable_amount: Decimal,
    /// Amount on which the discount is granted.
    pub covered_amount: Decimal,
    pub monthly_savings: Decimal,
    pub new_monthly_bill: Decimal,
    pub period_savings: Decimal,
    pub monthly_consumption_kwh: Decimal,
    pub monthly_saved_kwh: Decimal,
    pub monthly_co2_avoided_kg: Decimal,
    pub period_co2_avoided_kg: Decimal,
    pub period_co2_avoided_t: Decimal,
    /// Present only when the input carries a point value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<LoyaltyPoints>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> CalculationInput {
        CalculationInput {
            bill_amount: dec!(1500),
            discount_pct: dec!(15),
            coverage_pct: dec!(80),
            variable_share_pct: dec!(80),
            period_months: 12,
            avg_tariff: dec!(0.95),
            grid_emission_factor: dec!(0.35),
            green_emission_factor: None,
            coverage_base: CoverageBase::VariablePortion,
            saved_energy_mode: SavedEnergyMode::TariffDivision,
            point_value: None,
        }
    }

    #[test]
    fn test_normalized_clamps_percentages() {
        let input = CalculationInput {
            discount_pct: dec!(150),
            coverage_pct: dec!(-5),
            variable_share_pct: dec!(100.5),
            ..sample_input()
        };
        let normalized = input.normalized();
        assert_eq!(normalized.discount_pct, dec!(100));
        assert_eq!(normalized.coverage_pct, dec!(0));
        assert_eq!(normalized.variable_share_pct, dec!(100));
    }

    #[test]
    fn test_normalized_floors_amounts_and_period() {
        let input = CalculationInput {
            bill_amount: dec!(-10),
            avg_tariff: dec!(-0.5),
            grid_emission_factor: dec!(-1),
            green_emission_factor: Some(dec!(-0.2)),
            period_months: 0,
            point_value: Some(dec!(0)),
            ..sample_input()
        };
        let normalized = input.normalized();
        assert_eq!(normalized.bill_amount, Decimal::ZERO);
        assert_eq!(normalized.avg_tariff, Decimal::ZERO);
        assert_eq!(normalized.grid_emission_factor, Decimal::ZERO);
        assert_eq!(normalized.green_emission_factor, Some(Decimal::ZERO));
        assert_eq!(normalized.period_months, 1);
        assert_eq!(normalized.point_value, None);
    }

    #[test]
    fn test_normalized_keeps_valid_input() {
        let input = sample_input();
        assert_eq!(input.normalized(), input);
    }

    #[test]
    fn test_mode_parsing_accepts_variants() {
        assert_eq!(
            "variable-portion".parse::<CoverageBase>().unwrap(),
            CoverageBase::VariablePortion
        );
        assert_eq!(" FULL_BILL ".parse::<CoverageBase>().unwrap(), CoverageBase::FullBill);
        assert_eq!(
            "consumption_share".parse::<SavedEnergyMode>().unwrap(),
            SavedEnergyMode::ConsumptionShare
        );
        assert!("half".parse::<CoverageBase>().is_err());
        assert!("guess".parse::<SavedEnergyMode>().is_err());
    }

    #[test]
    fn test_input_deserializes_from_camel_case() {
        let json = r#"{
            "billAmount": 1500,
            "discountPct": 15,
            "coveragePct": 80,
            "variableSharePct": 80,
            "periodMonths": 12,
            "avgTariff": 0.95,
            "gridEmissionFactor": 0.35,
            "coverageBase": "VARIABLE_PORTION",
            "savedEnergyMode": "TARIFF_DIVISION"
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, sample_input());
    }
}
