//! Annual corporate income-tax computation.
//!
//! Derives the taxable base from accounting profit through a fixed chain
//! of non-monetary and fiscal adjustments, then applies the flat income
//! tax rate.
//!
//! # Computation stages
//!
//! | Stage | Description |
//! |-------|-------------|
//! | 1     | Cost of goods sold: opening inventory + purchases − closing inventory |
//! | 2     | Gross profit: sales − cost of goods sold |
//! | 3     | Operating expenses: payroll + named expense categories |
//! | 4     | Non-monetary expenses: statutory depreciation/amortization + manual items |
//! | 5     | Net accounting profit: gross profit − stages 3 and 4 (may be negative) |
//! | 6     | Fiscal adjustments: non-deductible + discretionary items, added back |
//! | 7     | Exempt income: subtracted |
//! | 8     | Taxable base: max(0, profit + adjustments − exempt income) |
//! | 9     | Tax due: taxable base × income-tax rate |
//!
//! # Statutory depreciation
//!
//! The straight-line rates — 25% for computer equipment (4-year life),
//! 10% for furniture (10-year life), 20% for software amortization
//! (5-year life) — are part of the statutory regime, not configuration.
//! Changing them is a deliberate code change.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tributo_core::calculations::AnnualIncomeTaxCalculator;
//! use tributo_core::{AnnualIncomeTaxInputs, AnnualOperatingData, RateTable};
//!
//! let rates = RateTable {
//!     vat_rate: dec!(0.13),
//!     transaction_tax_rate: dec!(0.03),
//!     income_tax_rate: dec!(0.25),
//! };
//!
//! let operating = AnnualOperatingData {
//!     sales_total: dec!(20000.00),
//!     purchases_total: dec!(5000.00),
//!     ..Default::default()
//! };
//!
//! let inputs = AnnualIncomeTaxInputs {
//!     opening_inventory_value: dec!(1000.00),
//!     closing_inventory_value: dec!(500.00),
//!     ..Default::default()
//! };
//!
//! let result = AnnualIncomeTaxCalculator::new(&rates).compute(&operating, &inputs);
//!
//! assert_eq!(result.cost_of_goods_sold, dec!(5500.00));
//! assert_eq!(result.gross_profit, dec!(14500.00));
//! assert_eq!(result.taxable_base, dec!(14500.00));
//! assert_eq!(result.tax_due, dec!(3625.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::models::{AdjustmentItem, AnnualIncomeTaxInputs, AnnualOperatingData, RateTable};

/// Result of one fiscal year's income-tax computation, one field per
/// stage of the pipeline. `taxable_base` is never negative; a fiscal
/// loss produces a zero base and zero tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualIncomeTaxResult {
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses_total: Decimal,
    pub non_monetary_expenses_total: Decimal,
    pub net_accounting_profit: Decimal,
    pub fiscal_adjustments_total: Decimal,
    pub exempt_income_total: Decimal,
    pub taxable_base: Decimal,
    pub tax_due: Decimal,
}

/// Calculator for the annual corporate income tax.
///
/// A total function: every numeric input combination produces a result.
/// Negative inputs (a loss-making year, bad upstream data) flow through
/// the arithmetic untouched; the only clamp is the final taxable base.
#[derive(Debug, Clone)]
pub struct AnnualIncomeTaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> AnnualIncomeTaxCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Computes the full annual income-tax pipeline.
    pub fn compute(
        &self,
        operating: &AnnualOperatingData,
        inputs: &AnnualIncomeTaxInputs,
    ) -> AnnualIncomeTaxResult {
        let cost_of_goods_sold = self.cost_of_goods_sold(operating, inputs);
        let gross_profit = self.gross_profit(operating.sales_total, cost_of_goods_sold);
        let operating_expenses_total = self.operating_expenses_total(operating);
        let non_monetary_expenses_total = self.non_monetary_expenses_total(inputs);

        let net_accounting_profit = round_half_up(
            gross_profit - operating_expenses_total - non_monetary_expenses_total,
        );

        let fiscal_adjustments_total = self.fiscal_adjustments_total(inputs);
        let exempt_income_total = round_half_up(AdjustmentItem::total(&inputs.exempt_income_items));

        let taxable_base = max(
            round_half_up(net_accounting_profit + fiscal_adjustments_total - exempt_income_total),
            Decimal::ZERO,
        );
        let tax_due = round_half_up(taxable_base * self.rates.income_tax_rate);

        AnnualIncomeTaxResult {
            cost_of_goods_sold,
            gross_profit,
            operating_expenses_total,
            non_monetary_expenses_total,
            net_accounting_profit,
            fiscal_adjustments_total,
            exempt_income_total,
            taxable_base,
            tax_due,
        }
    }

    /// Stage 1: opening inventory + purchases − closing inventory.
    fn cost_of_goods_sold(
        &self,
        operating: &AnnualOperatingData,
        inputs: &AnnualIncomeTaxInputs,
    ) -> Decimal {
        round_half_up(
            inputs.opening_inventory_value + operating.purchases_total
                - inputs.closing_inventory_value,
        )
    }

    /// Stage 2: sales − cost of goods sold.
    fn gross_profit(
        &self,
        sales_total: Decimal,
        cost_of_goods_sold: Decimal,
    ) -> Decimal {
        round_half_up(sales_total - cost_of_goods_sold)
    }

    /// Stage 3: payroll plus every named expense category.
    fn operating_expenses_total(
        &self,
        operating: &AnnualOperatingData,
    ) -> Decimal {
        let categories: Decimal = operating.operating_expense_categories.values().sum();
        round_half_up(operating.payroll_total + categories)
    }

    /// Stage 4: statutory depreciation and amortization plus the manual
    /// depreciation figure and the extra non-monetary line items.
    fn non_monetary_expenses_total(
        &self,
        inputs: &AnnualIncomeTaxInputs,
    ) -> Decimal {
        // 4-year life
        let computer_depreciation = inputs.computer_equipment_value * Decimal::new(25, 2);
        // 10-year life
        let furniture_depreciation = inputs.furniture_value * Decimal::new(10, 2);
        // 5-year life
        let software_amortization =
            AdjustmentItem::total(&inputs.software_items) * Decimal::new(20, 2);

        round_half_up(
            computer_depreciation
                + furniture_depreciation
                + software_amortization
                + inputs.other_depreciation
                + AdjustmentItem::total(&inputs.extra_non_monetary_items),
        )
    }

    /// Stage 6: non-deductible expenses and discretionary adjustments,
    /// added back to the base.
    fn fiscal_adjustments_total(
        &self,
        inputs: &AnnualIncomeTaxInputs,
    ) -> Decimal {
        round_half_up(
            AdjustmentItem::total(&inputs.non_deductible_items)
                + AdjustmentItem::total(&inputs.discretionary_adjustment_items),
        )
    }
}
