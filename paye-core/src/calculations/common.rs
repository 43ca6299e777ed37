//! Common rounding helpers for PAYE calculations.
//!
//! Money is rounded to whole Naira; percentages shown to users are rounded to
//! two places. Both use half-up rounding, where a value exactly halfway
//! between two units moves away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to the nearest whole currency unit.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(19999.95)), dec!(20000));
/// assert_eq!(round_to_unit(dec!(0.5)), dec!(1));
/// assert_eq!(round_to_unit(dec!(0.49)), dec!(0));
/// assert_eq!(round_to_unit(dec!(-2.5)), dec!(-3)); // Away from zero
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
/// assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_unit tests
    // =========================================================================

    #[test]
    fn round_to_unit_rounds_down_below_midpoint() {
        assert_eq!(round_to_unit(dec!(10.49)), dec!(10));
    }

    #[test]
    fn round_to_unit_rounds_up_at_midpoint() {
        assert_eq!(round_to_unit(dec!(10.5)), dec!(11));
    }

    #[test]
    fn round_to_unit_rounds_up_above_midpoint() {
        assert_eq!(round_to_unit(dec!(10.51)), dec!(11));
    }

    #[test]
    fn round_to_unit_handles_negative_values() {
        assert_eq!(round_to_unit(dec!(-10.5)), dec!(-11));
    }

    #[test]
    fn round_to_unit_preserves_whole_values() {
        assert_eq!(round_to_unit(dec!(20000)), dec!(20000));
    }

    #[test]
    fn round_to_unit_handles_zero() {
        assert_eq!(round_to_unit(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn round_to_unit_handles_fifteen_percent_of_odd_slice() {
        // 133,333 × 15% = 19,999.95
        assert_eq!(round_to_unit(dec!(133333) * dec!(15) / dec!(100)), dec!(20000));
    }

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_handles_repeating_fractions() {
        assert_eq!(round_half_up(dec!(100) / dec!(3)), dec!(33.33));
    }
}
