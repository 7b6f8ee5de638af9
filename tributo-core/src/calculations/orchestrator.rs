//! Multi-period orchestration.
//!
//! Walks a sequence of fiscal periods for one tenant, chaining each
//! period's closing credit balance into the next period's opening
//! balance, and assembles year-level summaries. The orchestrator is the
//! single writer of closing balances back to the carry-forward store;
//! per-period lookups elsewhere are a fallback path only.
//!
//! Periods of one tenant must be processed strictly in order — period
//! *n*'s result defines period *n+1*'s opening balance. Different
//! tenants share no mutable state and may be orchestrated in parallel.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::annual::{AnnualIncomeTaxCalculator, AnnualIncomeTaxResult};
use crate::calculations::turnover::{MonthlyTaxResult, TurnoverTaxCalculator, TurnoverTaxError};
use crate::models::{
    AnnualIncomeTaxInputs, AnnualOperatingData, FiscalPeriod, PeriodTotals, RateTable, TenantId,
};
use crate::store::{CarryForwardStore, StoreError, lookup_or_default};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Turnover(#[from] TurnoverTaxError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Twelve months of turnover-tax results plus the year's income-tax
/// computation, for trend and annual reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub monthly: Vec<MonthlyTaxResult>,
    pub annual: AnnualIncomeTaxResult,
}

/// Drives the calculators across sequences of periods for one tenant.
#[derive(Clone)]
pub struct MultiPeriodOrchestrator<'a> {
    store: &'a dyn CarryForwardStore,
    rates: &'a RateTable,
}

impl<'a> MultiPeriodOrchestrator<'a> {
    pub fn new(
        store: &'a dyn CarryForwardStore,
        rates: &'a RateTable,
    ) -> Self {
        Self { store, rates }
    }

    /// Computes a sequence of periods in order, chaining closing credit
    /// balances into opening balances.
    ///
    /// For each period the stored parameters supply the inflation
    /// indices; from the second period on, the opening balance comes
    /// from the chain rather than the store. Each period's parameters —
    /// closing balance included — are written back so the chain survives
    /// this run.
    ///
    /// # Errors
    ///
    /// Fails on the first period with an invalid inflation index or a
    /// store failure; earlier periods' writes are kept.
    pub fn run_series(
        &self,
        tenant: &TenantId,
        series: &[(FiscalPeriod, PeriodTotals)],
    ) -> Result<Vec<MonthlyTaxResult>, OrchestratorError> {
        let calculator = TurnoverTaxCalculator::new(self.rates);
        let mut results = Vec::with_capacity(series.len());
        let mut chained_opening: Option<Decimal> = None;

        for (period, totals) in series {
            let mut params = lookup_or_default(self.store, tenant, *period)?;
            if let Some(opening) = chained_opening {
                params.opening_credit_balance = opening;
            }

            let result = calculator.compute(totals, &params)?;

            debug!(
                %tenant,
                %period,
                turnover_tax_due = %result.turnover_tax_due,
                carry_forward = %result.new_closing_credit_balance,
                "period computed"
            );

            params.closing_credit_balance = result.new_closing_credit_balance;
            self.store.put(tenant, *period, params)?;

            chained_opening = Some(result.new_closing_credit_balance);
            results.push(result);
        }

        Ok(results)
    }

    /// Computes a full fiscal year: the twelve-month turnover series and
    /// one annual income-tax computation over the same totals.
    ///
    /// `months` maps month numbers (1..=12) to aggregated totals; absent
    /// months contribute zero totals rather than failing. The annual
    /// sales and purchases figures are summed from the monthly totals in
    /// memory, so the year's facts are only aggregated once.
    pub fn run_year(
        &self,
        tenant: &TenantId,
        year: i32,
        months: &BTreeMap<u32, PeriodTotals>,
        payroll_total: Decimal,
        operating_expense_categories: &BTreeMap<String, Decimal>,
        inputs: &AnnualIncomeTaxInputs,
    ) -> Result<YearSummary, OrchestratorError> {
        let series: Vec<(FiscalPeriod, PeriodTotals)> = FiscalPeriod::months_of(year)
            .into_iter()
            .map(|period| {
                let totals = months.get(&period.month).cloned().unwrap_or_default();
                (period, totals)
            })
            .collect();

        let monthly = self.run_series(tenant, &series)?;

        let operating = AnnualOperatingData {
            sales_total: series.iter().map(|(_, t)| t.sales_total).sum(),
            purchases_total: series.iter().map(|(_, t)| t.purchases_gross).sum(),
            payroll_total,
            operating_expense_categories: operating_expense_categories.clone(),
        };
        let annual = AnnualIncomeTaxCalculator::new(self.rates).compute(&operating, inputs);

        Ok(YearSummary { monthly, annual })
    }
}
