//! Savings and avoided-emissions calculation.
//!
//! [`compute`] chains the step functions below. Each step is public so callers
//! and tests can pin a single formula. None of them fail: a zero tariff or a
//! missing point value turns the dependent metrics into zero, and a product or
//! quotient beyond the range of [`Decimal`] saturates at its bounds.

use log::debug;
use rust_decimal::Decimal;

use crate::constants::{KG_PER_TONNE, PERCENT_BASE};
use crate::savings::savings_model::{
    CalculationInput, CalculationResult, CoverageBase, LoyaltyPoints, SavedEnergyMode,
};

/// Computes every figure of a simulation.
///
/// The input is normalized first, so out-of-range values are clamped rather
/// than rejected. Pure and deterministic.
pub fn compute(input: &CalculationInput) -> CalculationResult {
    let input = input.normalized();

    let variable = variable_amount(input.bill_amount, input.variable_share_pct);
    let coverage_base_amount = match input.coverage_base {
        CoverageBase::VariablePortion => variable,
        CoverageBase::FullBill => input.bill_amount,
    };
    let covered = covered_amount(coverage_base_amount, input.coverage_pct);
    let savings = monthly_savings(covered, input.discount_pct);

    if input.avg_tariff.is_zero() {
        debug!("Average tariff is zero, energy and emission metrics resolve to zero");
    }
    let consumption_kwh = energy_from_amount(variable, input.avg_tariff);
    let saved_kwh = saved_energy_kwh(
        input.saved_energy_mode,
        savings,
        consumption_kwh,
        input.avg_tariff,
        input.discount_pct,
        input.coverage_pct,
    );

    let monthly_co2_kg = co2_avoided_kg(
        saved_kwh,
        input.grid_emission_factor,
        input.green_emission_factor,
    );
    let period_co2_kg = period_total(monthly_co2_kg, input.period_months);

    let loyalty = input
        .point_value
        .map(|value| loyalty_points(savings, input.bill_amount, Some(value)));
    if loyalty.is_none() {
        debug!("No point value configured, loyalty metrics skipped");
    }

    CalculationResult {
        variable_amount: variable,
        covered_amount: covered,
        monthly_savings: savings,
        new_monthly_bill: new_monthly_bill(input.bill_amount, savings),
        period_savings: period_total(savings, input.period_months),
        monthly_consumption_kwh: consumption_kwh,
        monthly_saved_kwh: saved_kwh,
        monthly_co2_avoided_kg: monthly_co2_kg,
        period_co2_avoided_kg: period_co2_kg,
        period_co2_avoided_t: kg_to_tonnes(period_co2_kg),
        loyalty,
    }
}

fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    match amount.checked_mul(pct) {
        Some(product) => product / PERCENT_BASE,
        None => saturating_mul(amount, pct / PERCENT_BASE),
    }
}

fn saturating_mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs)
        .unwrap_or_else(|| saturated(lhs.is_sign_negative() != rhs.is_sign_negative()))
}

/// `divisor` must be non-zero.
fn saturating_div(dividend: Decimal, divisor: Decimal) -> Decimal {
    dividend
        .checked_div(divisor)
        .unwrap_or_else(|| saturated(dividend.is_sign_negative() != divisor.is_sign_negative()))
}

fn saturated(negative: bool) -> Decimal {
    debug!("Decimal overflow, saturating the result");
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Consumption-based part of the bill.
pub fn variable_amount(bill_amount: Decimal, variable_share_pct: Decimal) -> Decimal {
    percent_of(bill_amount, variable_share_pct)
}

/// Part of `base_amount` supplied by green energy, on which the discount is granted.
pub fn covered_amount(base_amount: Decimal, coverage_pct: Decimal) -> Decimal {
    percent_of(base_amount, coverage_pct)
}

pub fn monthly_savings(covered_amount: Decimal, discount_pct: Decimal) -> Decimal {
    percent_of(covered_amount, discount_pct)
}

/// Bill after savings, floored at zero.
pub fn new_monthly_bill(bill_amount: Decimal, monthly_savings: Decimal) -> Decimal {
    (bill_amount - monthly_savings).max(Decimal::ZERO)
}

/// Accumulates a monthly figure over the simulation period.
pub fn period_total(monthly_value: Decimal, period_months: u32) -> Decimal {
    saturating_mul(monthly_value, Decimal::from(period_months))
}

/// Converts a monetary amount into kWh at the given tariff.
///
/// Returns zero when the tariff is not positive.
pub fn energy_from_amount(amount: Decimal, avg_tariff: Decimal) -> Decimal {
    if avg_tariff > Decimal::ZERO {
        saturating_div(amount, avg_tariff)
    } else {
        Decimal::ZERO
    }
}

/// Monthly energy saved, according to `mode`.
pub fn saved_energy_kwh(
    mode: SavedEnergyMode,
    monthly_savings: Decimal,
    monthly_consumption_kwh: Decimal,
    avg_tariff: Decimal,
    discount_pct: Decimal,
    coverage_pct: Decimal,
) -> Decimal {
    match mode {
        SavedEnergyMode::TariffDivision => energy_from_amount(monthly_savings, avg_tariff),
        // consumption is already zero when the tariff is not positive
        SavedEnergyMode::ConsumptionShare => {
            percent_of(percent_of(monthly_consumption_kwh, discount_pct), coverage_pct)
        }
    }
}

/// kg CO2e avoided by `saved_kwh`.
///
/// With a green factor the avoided mass is the differential between grid and
/// green intensity, floored at zero.
pub fn co2_avoided_kg(
    saved_kwh: Decimal,
    grid_emission_factor: Decimal,
    green_emission_factor: Option<Decimal>,
) -> Decimal {
    let factor = grid_emission_factor - green_emission_factor.unwrap_or(Decimal::ZERO);
    saturating_mul(saved_kwh, factor).max(Decimal::ZERO)
}

pub fn kg_to_tonnes(kg: Decimal) -> Decimal {
    kg / KG_PER_TONNE
}

/// Loyalty points for the given savings.
///
/// All three metrics are zero when `point_value` is absent or not positive.
pub fn loyalty_points(
    monthly_savings: Decimal,
    bill_amount: Decimal,
    point_value: Option<Decimal>,
) -> LoyaltyPoints {
    let Some(point_value) = point_value.filter(|value| *value > Decimal::ZERO) else {
        return LoyaltyPoints::default();
    };

    let monthly_points = saturating_div(monthly_savings, point_value);
    let points_to_zero_bill = saturating_div(bill_amount, point_value);
    LoyaltyPoints {
        monthly_points,
        points_to_zero_bill,
        additional_points_needed: (points_to_zero_bill - monthly_points).max(Decimal::ZERO),
    }
}
