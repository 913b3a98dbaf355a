use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Divisor turning a percentage into a ratio.
pub const PERCENT_BASE: Decimal = dec!(100);

/// Upper bound of every percentage input.
pub const MAX_PERCENT: Decimal = dec!(100);

/// Kilograms per metric tonne.
pub const KG_PER_TONNE: Decimal = dec!(1000);

/// Shortest simulation horizon.
pub const MIN_PERIOD_MONTHS: u32 = 1;

// Default form values of the commercial calculator
pub const DEFAULT_BILL_AMOUNT: Decimal = dec!(1500.00);
pub const DEFAULT_DISCOUNT_PCT: Decimal = dec!(15);
pub const DEFAULT_COVERAGE_PCT: Decimal = dec!(80);
pub const DEFAULT_VARIABLE_SHARE_PCT: Decimal = dec!(100);
pub const DEFAULT_PERIOD_MONTHS: u32 = 12;
pub const DEFAULT_AVG_TARIFF: Decimal = dec!(0.95);

/// Illustrative grid factor in kg CO2e/kWh. Formal inventories should use the
/// official factor of the distributor/region.
pub const DEFAULT_GRID_EMISSION_FACTOR: Decimal = dec!(0.35);

/// Currency value of one loyalty point (one point per R$ 0,03 saved).
pub const DEFAULT_POINT_VALUE: Decimal = dec!(0.03);
