//! Shared helpers for the calculation modules.

use rust_decimal::Decimal;

/// Rounds a monetary value to two decimal places, half-up (midpoint away
/// from zero), the standard financial convention. Applied at every
/// derived line so intermediate precision never leaks into results.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tributo_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(649.994)), dec!(649.99));
/// assert_eq!(round_half_up(dec!(649.995)), dec!(650.00));
/// assert_eq!(round_half_up(dec!(-649.995)), dec!(-650.00)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tributo_core::calculations::common::max;
///
/// assert_eq!(max(dec!(0.00), dec!(-1500.00)), dec!(0.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(520.004)), dec!(520.00));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(520.005)), dec!(520.01));
    }

    #[test]
    fn round_half_up_rounds_negative_away_from_zero() {
        assert_eq!(round_half_up(dec!(-520.005)), dec!(-520.01));
    }

    #[test]
    fn round_half_up_preserves_rounded_values() {
        assert_eq!(round_half_up(dec!(520.01)), dec!(520.01));
    }

    #[test]
    fn round_half_up_handles_zero() {
        assert_eq!(round_half_up(dec!(0)), dec!(0));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(250.00)), dec!(250.00));
    }

    #[test]
    fn max_clamps_negative_against_zero() {
        assert_eq!(max(dec!(-1500.00), dec!(0)), dec!(0));
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(42.00), dec!(42.00)), dec!(42.00));
    }
}
