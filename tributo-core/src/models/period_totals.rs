use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar totals for one fiscal period, derived on demand from raw ledger
/// records and never cached.
///
/// `purchases_credit_base` may be smaller than `purchases_gross` when some
/// purchases record a partial credit base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub sales_total: Decimal,
    pub purchases_credit_base: Decimal,
    pub purchases_gross: Decimal,
}
