//! Monthly turnover-tax computation.
//!
//! This module implements the two monthly turnover taxes: a value-added
//! style tax netted against an inflation-indexed carried credit, and a
//! flat gross-receipts transaction tax.
//!
//! # Computation steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Indexed opening credit: opening balance × (index end ÷ index start) |
//! | 2    | Output tax: sales total × VAT rate |
//! | 3    | Input credit: purchase credit base × VAT rate |
//! | 4    | Net position: output tax − input credit − indexed opening credit |
//! | 5    | Positive net position → tax due, zero carry-forward |
//! | 6    | Non-positive net position → zero tax, carry-forward of the unused credit |
//! | 7    | Transaction tax: sales total × transaction-tax rate (independent of 1–6) |
//!
//! The opening credit is restated in period-end currency terms before
//! netting, so a moving price index neither erodes nor inflates the real
//! value of a carried credit. The period's own fresh carry-forward is
//! kept at face value; the *next* period re-indexes it with its own
//! start/end indices.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tributo_core::calculations::TurnoverTaxCalculator;
//! use tributo_core::{CarryForwardParameters, PeriodTotals, RateTable};
//!
//! let rates = RateTable {
//!     vat_rate: dec!(0.13),
//!     transaction_tax_rate: dec!(0.03),
//!     income_tax_rate: dec!(0.25),
//! };
//!
//! let totals = PeriodTotals {
//!     sales_total: dec!(10000.00),
//!     purchases_credit_base: dec!(6000.00),
//!     purchases_gross: dec!(6000.00),
//! };
//!
//! let calculator = TurnoverTaxCalculator::new(&rates);
//! let result = calculator
//!     .compute(&totals, &CarryForwardParameters::neutral())
//!     .unwrap();
//!
//! assert_eq!(result.turnover_tax_due, dec!(520.00));
//! assert_eq!(result.transaction_tax_due, dec!(300.00));
//! assert_eq!(result.new_closing_credit_balance, dec!(0.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::models::{CarryForwardParameters, PeriodTotals, RateTable};

/// Errors that can occur during the monthly turnover-tax computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnoverTaxError {
    /// The inflation index at period start must be positive to restate
    /// the opening credit; defaulting it would misstate the credit, so
    /// the period's computation fails instead.
    #[error("inflation index at period start must be positive, got {0}")]
    InvalidInflationIndex(Decimal),
}

/// Result of one period's turnover-tax computation.
///
/// Exactly one of `turnover_tax_due` and `new_closing_credit_balance` is
/// non-zero (both may be zero): a period either owes tax or carries
/// credit, never both. `transaction_tax_due` is independent of the
/// credit mechanism and always payable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTaxResult {
    pub turnover_tax_due: Decimal,
    pub transaction_tax_due: Decimal,
    pub new_closing_credit_balance: Decimal,
}

/// Calculator for the monthly turnover taxes.
///
/// Rates are injected so the same algorithm serves any jurisdiction with
/// this shape of turnover tax. The calculator is a pure function of its
/// inputs; calling it twice with identical inputs yields identical
/// results.
#[derive(Debug, Clone)]
pub struct TurnoverTaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> TurnoverTaxCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Computes one period's turnover-tax result.
    ///
    /// # Errors
    ///
    /// Returns [`TurnoverTaxError::InvalidInflationIndex`] when the
    /// period-start index is zero or negative.
    pub fn compute(
        &self,
        totals: &PeriodTotals,
        params: &CarryForwardParameters,
    ) -> Result<MonthlyTaxResult, TurnoverTaxError> {
        let indexed_opening_credit = self.indexed_opening_credit(params)?;

        let output_tax = self.output_tax(totals.sales_total);
        let input_credit = self.input_credit(totals.purchases_credit_base);

        let net_position = output_tax - input_credit - indexed_opening_credit;
        let (turnover_tax_due, new_closing_credit_balance) = self.split_net_position(net_position);

        let transaction_tax_due = self.transaction_tax(totals.sales_total);

        Ok(MonthlyTaxResult {
            turnover_tax_due,
            transaction_tax_due,
            new_closing_credit_balance,
        })
    }

    /// Restates the opening credit balance in period-end currency terms.
    fn indexed_opening_credit(
        &self,
        params: &CarryForwardParameters,
    ) -> Result<Decimal, TurnoverTaxError> {
        if params.inflation_index_start <= Decimal::ZERO {
            return Err(TurnoverTaxError::InvalidInflationIndex(
                params.inflation_index_start,
            ));
        }

        let factor = params.inflation_index_end / params.inflation_index_start;
        Ok(round_half_up(params.opening_credit_balance * factor))
    }

    /// Tax owed on the period's sales.
    fn output_tax(
        &self,
        sales_total: Decimal,
    ) -> Decimal {
        round_half_up(sales_total * self.rates.vat_rate)
    }

    /// Credit earned on the period's eligible purchases.
    fn input_credit(
        &self,
        purchases_credit_base: Decimal,
    ) -> Decimal {
        round_half_up(purchases_credit_base * self.rates.vat_rate)
    }

    /// Splits the net position into (tax due, carry-forward): a positive
    /// position is owed; a non-positive one rolls forward at face value.
    fn split_net_position(
        &self,
        net_position: Decimal,
    ) -> (Decimal, Decimal) {
        if net_position > Decimal::ZERO {
            (round_half_up(net_position), Decimal::ZERO)
        } else {
            (Decimal::ZERO, round_half_up(-net_position))
        }
    }

    /// Flat tax on gross sales, regardless of the credit position.
    fn transaction_tax(
        &self,
        sales_total: Decimal,
    ) -> Decimal {
        round_half_up(sales_total * self.rates.transaction_tax_rate)
    }
}
