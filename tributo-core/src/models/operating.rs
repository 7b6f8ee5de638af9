use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AdjustmentItem;

/// A full fiscal year of aggregated operating facts, supplied by the
/// surrounding ledger/payroll modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualOperatingData {
    pub sales_total: Decimal,
    pub purchases_total: Decimal,
    pub payroll_total: Decimal,
    /// Named operating-expense categories (rent, utilities, ...) mapped
    /// to their year totals.
    pub operating_expense_categories: BTreeMap<String, Decimal>,
}

/// Manually entered inputs for the annual income-tax computation.
///
/// All monetary fields are non-negative by convention; absence defaults
/// to zero via `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualIncomeTaxInputs {
    pub opening_inventory_value: Decimal,
    pub closing_inventory_value: Decimal,

    /// Depreciation beyond the fixed-asset lines below (vehicles,
    /// buildings, ...), entered as a single manual figure.
    pub other_depreciation: Decimal,

    /// Non-monetary expense line items beyond depreciation/amortization.
    pub extra_non_monetary_items: Vec<AdjustmentItem>,
    /// Expenses the law disallows as deductions; added back to the base.
    pub non_deductible_items: Vec<AdjustmentItem>,
    /// Discretionary fiscal adjustments; added back to the base.
    pub discretionary_adjustment_items: Vec<AdjustmentItem>,
    /// Income already taxed elsewhere or statutorily exempt; subtracted.
    pub exempt_income_items: Vec<AdjustmentItem>,

    /// Fixed-asset valuations driving the statutory depreciation lines.
    pub computer_equipment_value: Decimal,
    pub furniture_value: Decimal,
    /// Amortizable intangible assets (software licenses etc.).
    pub software_items: Vec<AdjustmentItem>,
}
