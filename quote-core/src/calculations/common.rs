//! Shared helpers for price calculations.

use rust_decimal::Decimal;

use crate::models::Currency;

/// Rounds a monetary value to the currency's minor-unit precision using
/// half-up rounding.
///
/// This follows standard invoicing conventions where values at exactly the
/// midpoint are rounded away from zero (e.g. 0.005 EUR becomes 0.01 EUR).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use quote_core::calculations::common::round_to_minor_units;
/// use quote_core::models::Currency;
///
/// assert_eq!(round_to_minor_units(dec!(123.454), Currency::Eur), dec!(123.45));
/// assert_eq!(round_to_minor_units(dec!(123.455), Currency::Eur), dec!(123.46));
/// assert_eq!(round_to_minor_units(dec!(123.5), Currency::Jpy), dec!(124));
/// ```
pub fn round_to_minor_units(
    value: Decimal,
    currency: Currency,
) -> Decimal {
    value.round_dp_with_strategy(
        currency.minor_units(),
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn rounds_down_below_midpoint() {
        let result = round_to_minor_units(dec!(123.454), Currency::Eur);

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn rounds_up_at_midpoint() {
        let result = round_to_minor_units(dec!(123.455), Currency::Eur);

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn rounds_up_above_midpoint() {
        let result = round_to_minor_units(dec!(123.456), Currency::Eur);

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn rounds_negative_values_away_from_zero() {
        let result = round_to_minor_units(dec!(-123.455), Currency::Eur);

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn preserves_already_rounded_values() {
        let result = round_to_minor_units(dec!(123.45), Currency::Usd);

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn rounds_to_whole_units_for_jpy() {
        let result = round_to_minor_units(dec!(123.45), Currency::Jpy);

        assert_eq!(result, dec!(123));
    }

    #[test]
    fn jpy_midpoint_rounds_up() {
        let result = round_to_minor_units(dec!(123.5), Currency::Jpy);

        assert_eq!(result, dec!(124));
    }

    #[test]
    fn handles_zero() {
        let result = round_to_minor_units(dec!(0.00), Currency::Eur);

        assert_eq!(result, dec!(0.00));
    }
}
