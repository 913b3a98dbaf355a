use greensave_core::{
    errors::Error as CoreError,
    format::{format_currency, format_number, NumberLocale},
    savings::{CalculationInput, CalculationResult, CoverageBase, SavedEnergyMode},
    settings::SimulationDefaults,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Simulation parameters sent by a client.
///
/// Every field is optional; missing ones come from the configured defaults.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[schema(value_type = Option<f64>)]
    pub bill_amount: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub discount_pct: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub coverage_pct: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub variable_share_pct: Option<Decimal>,
    pub period_months: Option<u32>,
    #[schema(value_type = Option<f64>)]
    pub avg_tariff: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub grid_emission_factor: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub green_emission_factor: Option<Decimal>,
    /// `VARIABLE_PORTION` or `FULL_BILL`.
    pub coverage_base: Option<String>,
    /// `TARIFF_DIVISION` or `CONSUMPTION_SHARE`.
    pub saved_energy_mode: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub point_value: Option<Decimal>,
    /// Display locale for formatted values, e.g. `pt-BR`.
    pub locale: Option<String>,
}

impl SimulationRequest {
    /// Merges the request over `defaults`.
    pub fn to_input(&self, defaults: &SimulationDefaults) -> Result<CalculationInput, CoreError> {
        let coverage_base = match &self.coverage_base {
            Some(raw) => raw.parse::<CoverageBase>()?,
            None => defaults.coverage_base,
        };
        let saved_energy_mode = match &self.saved_energy_mode {
            Some(raw) => raw.parse::<SavedEnergyMode>()?,
            None => defaults.saved_energy_mode,
        };

        Ok(CalculationInput {
            bill_amount: self.bill_amount.unwrap_or(defaults.bill_amount),
            discount_pct: self.discount_pct.unwrap_or(defaults.discount_pct),
            coverage_pct: self.coverage_pct.unwrap_or(defaults.coverage_pct),
            variable_share_pct: self
                .variable_share_pct
                .unwrap_or(defaults.variable_share_pct),
            period_months: self.period_months.unwrap_or(defaults.period_months),
            avg_tariff: self.avg_tariff.unwrap_or(defaults.avg_tariff),
            grid_emission_factor: self
                .grid_emission_factor
                .unwrap_or(defaults.grid_emission_factor),
            green_emission_factor: self.green_emission_factor.or(defaults.green_emission_factor),
            coverage_base,
            saved_energy_mode,
            point_value: self.point_value.or(defaults.point_value),
        })
    }

    /// Locale requested by the client, or `fallback`.
    pub fn locale_or(&self, fallback: NumberLocale) -> Option<NumberLocale> {
        match &self.locale {
            Some(tag) => NumberLocale::from_tag(tag),
            None => Some(fallback),
        }
    }
}

/// Headline figures formatted for display.
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSummary {
    pub monthly_savings: String,
    pub period_savings: String,
    pub new_monthly_bill: String,
    pub monthly_saved_kwh: String,
    pub period_co2_avoided_t: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_points: Option<String>,
}

impl FormattedSummary {
    pub fn new(result: &CalculationResult, locale: &NumberLocale) -> Self {
        Self {
            monthly_savings: format_currency(result.monthly_savings, locale),
            period_savings: format_currency(result.period_savings, locale),
            new_monthly_bill: format_currency(result.new_monthly_bill, locale),
            monthly_saved_kwh: format_number(result.monthly_saved_kwh, 0, locale),
            period_co2_avoided_t: format_number(result.period_co2_avoided_t, 2, locale),
            monthly_points: result
                .loyalty
                .map(|loyalty| format_number(loyalty.monthly_points, 0, locale)),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    /// Parameters actually used, after clamping.
    #[schema(value_type = Object)]
    pub input: CalculationInput,
    #[schema(value_type = Object)]
    pub result: CalculationResult,
    pub formatted: FormattedSummary,
}
