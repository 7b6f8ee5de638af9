//! Period aggregation of raw ledger records.
//!
//! Reduces a tenant's sale and purchase records to the scalar totals the
//! turnover-tax calculator consumes. Aggregation is read-only and total:
//! records with no parseable amount count as zero, never as an error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::models::{PeriodTotals, PurchaseRecord, SaleRecord};

/// Aggregates raw ledger records into [`PeriodTotals`].
///
/// Record selection uses the half-open interval `[period_start,
/// period_end)`: a record stamped exactly at `period_end` belongs to the
/// *next* period, so month boundaries never double-count.
pub struct PeriodAggregator;

impl PeriodAggregator {
    pub fn aggregate(
        sales: &[SaleRecord],
        purchases: &[PurchaseRecord],
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> PeriodTotals {
        let in_period =
            |recorded_at: DateTime<Utc>| recorded_at >= period_start && recorded_at < period_end;

        let sales_total: Decimal = sales
            .iter()
            .filter(|sale| in_period(sale.recorded_at))
            .map(|sale| sale.amount.unwrap_or(Decimal::ZERO))
            .sum();

        let mut purchases_gross = Decimal::ZERO;
        let mut purchases_credit_base = Decimal::ZERO;
        for purchase in purchases.iter().filter(|p| in_period(p.recorded_at)) {
            let gross = purchase.amount.unwrap_or(Decimal::ZERO);
            purchases_gross += gross;
            // Fallback policy: without a distinct credit base the whole
            // gross amount is creditable.
            purchases_credit_base += purchase.credit_base.unwrap_or(gross);
        }

        PeriodTotals {
            sales_total: round_half_up(sales_total),
            purchases_credit_base: round_half_up(purchases_credit_base),
            purchases_gross: round_half_up(purchases_gross),
        }
    }
}
