use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory tax rates, injected as configuration so a jurisdiction or
/// rate change never touches calculator logic.
///
/// The annual depreciation/amortization percentages are deliberately not
/// here: they are part of the statutory regime itself and live as
/// constants next to the annual calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Rate applied to both taxed sales (output tax) and the purchase
    /// credit base (input credit).
    pub vat_rate: Decimal,
    /// Flat rate on gross sales, independent of the credit mechanism.
    pub transaction_tax_rate: Decimal,
    /// Flat rate on the annual taxable base.
    pub income_tax_rate: Decimal,
}
