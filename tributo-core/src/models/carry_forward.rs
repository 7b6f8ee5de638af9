use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Carry-forward state for one tenant and one fiscal period.
///
/// The inflation index is a published, monotonically non-decreasing price
/// index sampled at period start and end. `opening_credit_balance` is
/// nominal as of the *prior* period's close; the turnover calculator
/// restates it by `index_end / index_start` before netting.
///
/// For consecutive periods of the same tenant, this period's
/// `closing_credit_balance` should equal the next period's opening
/// balance. That chaining is the orchestrator's job, not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryForwardParameters {
    pub inflation_index_start: Decimal,
    pub inflation_index_end: Decimal,
    pub opening_credit_balance: Decimal,
    pub closing_credit_balance: Decimal,
}

impl CarryForwardParameters {
    /// Neutral defaults used when no parameters exist for a period:
    /// a flat index and no carried credit. Understates credit if history
    /// is genuinely missing; callers needing accuracy must supply real
    /// parameters.
    pub fn neutral() -> Self {
        Self {
            inflation_index_start: Decimal::ONE,
            inflation_index_end: Decimal::ONE,
            opening_credit_balance: Decimal::ZERO,
            closing_credit_balance: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn neutral_has_flat_index_and_zero_balances() {
        let params = CarryForwardParameters::neutral();

        assert_eq!(params.inflation_index_start, dec!(1));
        assert_eq!(params.inflation_index_end, dec!(1));
        assert_eq!(params.opening_credit_balance, dec!(0));
        assert_eq!(params.closing_credit_balance, dec!(0));
    }
}
