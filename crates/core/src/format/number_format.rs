//! Locale-aware number formatting for presentation layers.
//!
//! The calculator never formats its own output; report builders and adapters
//! call these helpers with the locale they render for.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Separator conventions of a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub currency_prefix: &'static str,
}

impl NumberLocale {
    /// Brazilian Portuguese: `R$ 1.234,56`.
    pub const fn pt_br() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
            currency_prefix: "R$ ",
        }
    }

    /// US English: `$1,234.56`.
    pub const fn en_us() -> Self {
        Self {
            thousands_separator: ',',
            decimal_separator: '.',
            currency_prefix: "$",
        }
    }

    /// Resolves a language tag such as `pt-BR` or `en_US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" | "pt" => Some(Self::pt_br()),
            "en-us" | "en" => Some(Self::en_us()),
            _ => None,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Formats `value` with `decimals` fractional digits and grouped thousands.
///
/// Midpoints round away from zero.
pub fn format_number(value: Decimal, decimals: u32, locale: &NumberLocale) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (integer_part, fraction_part) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(integer_part, locale.thousands_separator));
    if let Some(fraction) = fraction_part {
        out.push(locale.decimal_separator);
        out.push_str(fraction);
    }
    out
}

/// Formats a monetary amount with two decimals and the locale's currency prefix.
pub fn format_currency(value: Decimal, locale: &NumberLocale) -> String {
    let number = format_number(value.abs(), 2, locale);
    if value.round_dp(2).is_sign_negative() && !value.round_dp(2).is_zero() {
        format!("-{}{}", locale.currency_prefix, number)
    } else {
        format!("{}{}", locale.currency_prefix, number)
    }
}

/// Formats a percentage without trailing zeros, e.g. `15%` or `12,5%`.
pub fn format_percent(value: Decimal, locale: &NumberLocale) -> String {
    let normalized = value.normalize();
    let decimals = normalized.scale();
    format!("{}%", format_number(normalized, decimals, locale))
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BR: NumberLocale = NumberLocale::pt_br();
    const US: NumberLocale = NumberLocale::en_us();

    #[test]
    fn test_format_currency_pt_br() {
        assert_eq!(format_currency(dec!(1234.56), &BR), "R$ 1.234,56");
        assert_eq!(format_currency(dec!(1500), &BR), "R$ 1.500,00");
        assert_eq!(format_currency(dec!(0), &BR), "R$ 0,00");
        assert_eq!(format_currency(dec!(1234567.891), &BR), "R$ 1.234.567,89");
    }

    #[test]
    fn test_format_currency_en_us() {
        assert_eq!(format_currency(dec!(1234.56), &US), "$1,234.56");
        assert_eq!(format_currency(dec!(-42.5), &US), "-$42.50");
    }

    #[test]
    fn test_format_number_without_decimals() {
        assert_eq!(format_number(dec!(50000), 0, &BR), "50.000");
        assert_eq!(format_number(dec!(1578.947), 0, &BR), "1.579");
        assert_eq!(format_number(dec!(999), 0, &BR), "999");
        assert_eq!(format_number(dec!(1000), 0, &BR), "1.000");
    }

    #[test]
    fn test_format_number_rounds_half_away_from_zero() {
        assert_eq!(format_number(dec!(2.345), 2, &BR), "2,35");
        assert_eq!(format_number(dec!(-2.345), 2, &US), "-2.35");
        assert_eq!(format_number(dec!(0.35), 2, &BR), "0,35");
        assert_eq!(format_number(dec!(66.3158), 1, &BR), "66,3");
    }

    #[test]
    fn test_format_number_negative_zero_has_no_sign() {
        assert_eq!(format_number(dec!(-0.001), 2, &BR), "0,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(15), &BR), "15%");
        assert_eq!(format_percent(dec!(15.00), &BR), "15%");
        assert_eq!(format_percent(dec!(12.5), &BR), "12,5%");
    }

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(NumberLocale::from_tag("pt-BR"), Some(BR));
        assert_eq!(NumberLocale::from_tag("en_US"), Some(US));
        assert_eq!(NumberLocale::from_tag("fr-FR"), None);
    }
}
