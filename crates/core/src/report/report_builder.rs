//! Assembles the summary report of a simulation from its input and result.

use rust_decimal::Decimal;

use crate::format::{format_currency, format_number, format_percent, NumberLocale};
use crate::report::report_model::{ReportSection, SimulationReport};
use crate::savings::{CalculationInput, CalculationResult, CoverageBase};

pub const REPORT_TITLE: &str = "Green Energy Savings Calculator";
pub const REPORT_SUBTITLE: &str =
    "Summary of the estimated financial savings and environmental impact for this customer.";
pub const METHODOLOGY_NOTE: &str = "Estimated simulation. Methodology: kWh saved x emission \
    factor (kg CO2e/kWh), converted to tonnes. For official inventories (GHG Protocol Scope 2, \
    location-based or market-based approaches), use the approved factors for the customer's \
    region and energy source.";

pub const SECTION_SUMMARY: &str = "Simulation summary";
pub const SECTION_FINANCIAL: &str = "Financial parameters";
pub const SECTION_ENVIRONMENTAL: &str = "Estimated environmental impact";

pub const LABEL_CURRENT_BILL: &str = "Current bill";
pub const LABEL_NEW_BILL: &str = "Approximate new bill";
pub const LABEL_MONTHLY_SAVINGS: &str = "Monthly savings";
pub const LABEL_MONTHLY_POINTS: &str = "Points earned per month";
pub const LABEL_POINTS_TO_ZERO: &str = "Points to zero the bill";
pub const LABEL_ADDITIONAL_POINTS: &str = "Additional points needed";
pub const LABEL_DISCOUNT: &str = "Discount applied";
pub const LABEL_COVERAGE: &str = "Green energy coverage";
pub const LABEL_VARIABLE_SHARE: &str = "Variable share considered";
pub const LABEL_EMISSION_FACTOR: &str = "Emission factor";
pub const LABEL_GREEN_FACTOR: &str = "Green supply emission factor";
pub const LABEL_CONSUMPTION: &str = "Estimated consumption";
pub const LABEL_SAVED_ENERGY: &str = "Energy saved";
pub const LABEL_MONTHLY_CO2: &str = "CO2 avoided per month";

/// Label of the savings row for a given horizon.
pub fn period_savings_label(period_months: u32) -> String {
    format!("Savings over {} months", period_months)
}

/// Label of the avoided-emissions row for a given horizon.
pub fn period_co2_label(period_months: u32) -> String {
    format!("CO2 avoided over {} months", period_months)
}

/// Builds the summary report of a simulation.
///
/// `input` is normalized so the parameters shown match what the calculator
/// actually used.
pub fn build_report(
    input: &CalculationInput,
    result: &CalculationResult,
    locale: &NumberLocale,
) -> SimulationReport {
    let input = input.normalized();
    let months = input.period_months;

    let mut summary = ReportSection::new(SECTION_SUMMARY)
        .row(LABEL_CURRENT_BILL, format_currency(input.bill_amount, locale))
        .row(LABEL_NEW_BILL, format_currency(result.new_monthly_bill, locale))
        .row(
            LABEL_MONTHLY_SAVINGS,
            format_currency(result.monthly_savings, locale),
        )
        .row(
            period_savings_label(months),
            format_currency(result.period_savings, locale),
        );
    if let Some(loyalty) = &result.loyalty {
        summary = summary
            .row(LABEL_MONTHLY_POINTS, points(loyalty.monthly_points, locale))
            .row(LABEL_POINTS_TO_ZERO, points(loyalty.points_to_zero_bill, locale))
            .row(
                LABEL_ADDITIONAL_POINTS,
                points(loyalty.additional_points_needed, locale),
            );
    }

    let coverage_scope = match input.coverage_base {
        CoverageBase::VariablePortion => "of the variable portion",
        CoverageBase::FullBill => "of the bill",
    };
    let financial = ReportSection::new(SECTION_FINANCIAL)
        .row(LABEL_DISCOUNT, format_percent(input.discount_pct, locale))
        .row(
            LABEL_COVERAGE,
            format!("{} {}", format_percent(input.coverage_pct, locale), coverage_scope),
        )
        .row(
            LABEL_VARIABLE_SHARE,
            format!("{} of the bill", format_percent(input.variable_share_pct, locale)),
        );

    let mut environmental = ReportSection::new(SECTION_ENVIRONMENTAL).row(
        LABEL_EMISSION_FACTOR,
        emission_factor(input.grid_emission_factor, locale),
    );
    if let Some(green) = input.green_emission_factor {
        environmental = environmental.row(LABEL_GREEN_FACTOR, emission_factor(green, locale));
    }
    let environmental = environmental
        .row(
            LABEL_CONSUMPTION,
            format!(
                "{} kWh/month",
                format_number(result.monthly_consumption_kwh, 0, locale)
            ),
        )
        .row(
            LABEL_SAVED_ENERGY,
            format!("{} kWh/month", format_number(result.monthly_saved_kwh, 0, locale)),
        )
        .row(
            LABEL_MONTHLY_CO2,
            format!(
                "{} kg CO2e",
                format_number(result.monthly_co2_avoided_kg, 1, locale)
            ),
        )
        .row(
            period_co2_label(months),
            format!("{} t CO2e", format_number(result.period_co2_avoided_t, 2, locale)),
        );

    SimulationReport {
        title: REPORT_TITLE.to_string(),
        subtitle: REPORT_SUBTITLE.to_string(),
        sections: vec![summary, financial, environmental],
        methodology_note: METHODOLOGY_NOTE.to_string(),
        footer: None,
    }
}

fn points(value: Decimal, locale: &NumberLocale) -> String {
    format_number(value, 0, locale)
}

fn emission_factor(value: Decimal, locale: &NumberLocale) -> String {
    format!("{} kg CO2e/kWh", format_number(value, 2, locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::compute;
    use crate::settings::SimulationDefaults;
    use rust_decimal_macros::dec;

    fn default_report(locale: &NumberLocale) -> SimulationReport {
        let input = SimulationDefaults::default().to_input();
        let result = compute(&input);
        build_report(&input, &result, locale)
    }

    #[test]
    fn test_summary_section_pt_br() {
        let report = default_report(&NumberLocale::pt_br());
        let summary = report.section(SECTION_SUMMARY).unwrap();

        assert_eq!(summary.value_of(LABEL_CURRENT_BILL), Some("R$ 1.500,00"));
        assert_eq!(summary.value_of(LABEL_NEW_BILL), Some("R$ 1.320,00"));
        assert_eq!(summary.value_of(LABEL_MONTHLY_SAVINGS), Some("R$ 180,00"));
        assert_eq!(
            summary.value_of(&period_savings_label(12)),
            Some("R$ 2.160,00")
        );
        assert_eq!(summary.value_of(LABEL_MONTHLY_POINTS), Some("6.000"));
        assert_eq!(summary.value_of(LABEL_POINTS_TO_ZERO), Some("50.000"));
        assert_eq!(summary.value_of(LABEL_ADDITIONAL_POINTS), Some("44.000"));
    }

    #[test]
    fn test_financial_and_environmental_sections() {
        let report = default_report(&NumberLocale::pt_br());
        let financial = report.section(SECTION_FINANCIAL).unwrap();
        assert_eq!(financial.value_of(LABEL_DISCOUNT), Some("15%"));
        assert_eq!(financial.value_of(LABEL_COVERAGE), Some("80% of the bill"));
        assert_eq!(financial.value_of(LABEL_VARIABLE_SHARE), Some("100% of the bill"));

        let environmental = report.section(SECTION_ENVIRONMENTAL).unwrap();
        assert_eq!(
            environmental.value_of(LABEL_EMISSION_FACTOR),
            Some("0,35 kg CO2e/kWh")
        );
        assert_eq!(
            environmental.value_of(LABEL_CONSUMPTION),
            Some("1.579 kWh/month")
        );
        assert_eq!(environmental.value_of(LABEL_SAVED_ENERGY), Some("189 kWh/month"));
        assert_eq!(environmental.value_of(LABEL_MONTHLY_CO2), Some("66,3 kg CO2e"));
        assert_eq!(
            environmental.value_of(&period_co2_label(12)),
            Some("0,80 t CO2e")
        );
        assert!(environmental.value_of(LABEL_GREEN_FACTOR).is_none());
    }

    #[test]
    fn test_loyalty_rows_omitted_without_point_value() {
        let input = CalculationInput {
            point_value: None,
            ..SimulationDefaults::default().to_input()
        };
        let report = build_report(&input, &compute(&input), &NumberLocale::pt_br());
        let summary = report.section(SECTION_SUMMARY).unwrap();

        assert_eq!(summary.rows.len(), 4);
        assert!(summary.value_of(LABEL_MONTHLY_POINTS).is_none());
    }

    #[test]
    fn test_report_shows_clamped_parameters() {
        let input = CalculationInput {
            discount_pct: dec!(140),
            coverage_base: CoverageBase::VariablePortion,
            green_emission_factor: Some(dec!(0.05)),
            ..SimulationDefaults::default().to_input()
        };
        let report = build_report(&input, &compute(&input), &NumberLocale::en_us());
        let financial = report.section(SECTION_FINANCIAL).unwrap();
        assert_eq!(financial.value_of(LABEL_DISCOUNT), Some("100%"));
        assert_eq!(
            financial.value_of(LABEL_COVERAGE),
            Some("80% of the variable portion")
        );

        let environmental = report.section(SECTION_ENVIRONMENTAL).unwrap();
        assert_eq!(
            environmental.value_of(LABEL_GREEN_FACTOR),
            Some("0.05 kg CO2e/kWh")
        );
    }

    #[test]
    fn test_report_is_latin1_clean() {
        let text = default_report(&NumberLocale::pt_br()).to_plain_text();
        assert_eq!(crate::report::latin1_safe(&text), text);
    }
}
