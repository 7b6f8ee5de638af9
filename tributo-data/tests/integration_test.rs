//! End-to-end fiscal year over CSV fixtures: load configuration and
//! ledger files, aggregate each month, run the orchestrator, and check
//! the monthly chain and the annual summary.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use tributo_core::calculations::{MultiPeriodOrchestrator, PeriodAggregator};
use tributo_core::{
    AnnualIncomeTaxInputs, CarryForwardStore, FiscalPeriod, InMemoryCarryForwardStore,
    PeriodTotals, TenantId,
};
use tributo_data::{
    ExpenseCategoriesLoader, IndexSeriesLoader, LedgerCsvLoader, RateTableLoader,
};

const RATES_CSV: &str = include_str!("../test-data/rates.csv");
const INDICES_CSV: &str = include_str!("../test-data/indices_2024.csv");
const SALES_CSV: &str = include_str!("../test-data/sales_2024.csv");
const PURCHASES_CSV: &str = include_str!("../test-data/purchases_2024.csv");
const EXPENSES_CSV: &str = include_str!("../test-data/expenses_2024.csv");

fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap()
}

fn aggregate_year(year: i32) -> BTreeMap<u32, PeriodTotals> {
    let sales = LedgerCsvLoader::parse_sales(SALES_CSV.as_bytes()).expect("parse sales");
    let purchases =
        LedgerCsvLoader::parse_purchases(PURCHASES_CSV.as_bytes()).expect("parse purchases");

    FiscalPeriod::months_of(year)
        .into_iter()
        .map(|period| {
            let start = month_start(period.year, period.month);
            let next = period.next();
            let end = month_start(next.year, next.month);
            (
                period.month,
                PeriodAggregator::aggregate(&sales, &purchases, start, end),
            )
        })
        .collect()
}

fn loaded_store(tenant: &TenantId) -> InMemoryCarryForwardStore {
    let store = InMemoryCarryForwardStore::new();
    let records = IndexSeriesLoader::parse(INDICES_CSV.as_bytes()).expect("parse indices");
    IndexSeriesLoader::load(&store, tenant, &records).expect("load indices");
    store
}

#[test]
fn aggregation_matches_fixture_ledger() {
    let months = aggregate_year(2024);

    assert_eq!(months[&1].sales_total, dec!(10000.00));
    assert_eq!(months[&1].purchases_credit_base, dec!(6000.00));
    assert_eq!(months[&2].purchases_credit_base, dec!(15000.00));
    // The 2024-04-01T00:00:00Z sale sits exactly on the March/April
    // boundary and must land in April.
    assert_eq!(months[&3].sales_total, dec!(10000.00));
    assert_eq!(months[&4].sales_total, dec!(100.00));
    // May's purchase has a partial credit base.
    assert_eq!(months[&5].purchases_gross, dec!(1000.00));
    assert_eq!(months[&5].purchases_credit_base, dec!(400.00));
    // June's malformed amount row counts as zero.
    assert_eq!(months[&6].sales_total, dec!(400.00));
    assert_eq!(months[&12].sales_total, dec!(0));
}

#[test]
fn full_year_monthly_chain() {
    let tenant = TenantId::from("acme");
    let store = loaded_store(&tenant);
    let rates = RateTableLoader::parse(RATES_CSV.as_bytes()).expect("parse rates");
    let months = aggregate_year(2024);

    let orchestrator = MultiPeriodOrchestrator::new(&store, &rates);
    let summary = orchestrator
        .run_year(
            &tenant,
            2024,
            &months,
            dec!(5000.00),
            &ExpenseCategoriesLoader::parse(EXPENSES_CSV.as_bytes()).expect("parse expenses"),
            &AnnualIncomeTaxInputs {
                opening_inventory_value: dec!(1000.00),
                closing_inventory_value: dec!(500.00),
                ..Default::default()
            },
        )
        .expect("run year");

    // January: output 1300, credit 780, no carried credit.
    assert_eq!(summary.monthly[0].turnover_tax_due, dec!(520.00));
    assert_eq!(summary.monthly[0].transaction_tax_due, dec!(300.00));
    assert_eq!(summary.monthly[0].new_closing_credit_balance, dec!(0));

    // February: credit 1950 exceeds output 1300; 650 carried forward.
    assert_eq!(summary.monthly[1].turnover_tax_due, dec!(0));
    assert_eq!(summary.monthly[1].new_closing_credit_balance, dec!(650.00));

    // March: opening 650 restated by 2.10/2.00 = 682.50;
    // output 1300 - 682.50 = 617.50 due.
    assert_eq!(summary.monthly[2].turnover_tax_due, dec!(617.50));
    assert_eq!(summary.monthly[2].new_closing_credit_balance, dec!(0));

    // April: only the boundary sale of 100.
    assert_eq!(summary.monthly[3].turnover_tax_due, dec!(13.00));
    assert_eq!(summary.monthly[3].transaction_tax_due, dec!(3.00));

    // May: no sales; the partial credit base banks 52 of credit.
    assert_eq!(summary.monthly[4].turnover_tax_due, dec!(0));
    assert_eq!(summary.monthly[4].new_closing_credit_balance, dec!(52.00));

    // June: output 52 exactly consumed by the carried 52.
    assert_eq!(summary.monthly[5].turnover_tax_due, dec!(0));
    assert_eq!(summary.monthly[5].new_closing_credit_balance, dec!(0));
    assert_eq!(summary.monthly[5].transaction_tax_due, dec!(12.00));

    // July through December: no activity.
    for month in &summary.monthly[6..] {
        assert_eq!(month.turnover_tax_due, dec!(0));
        assert_eq!(month.transaction_tax_due, dec!(0));
        assert_eq!(month.new_closing_credit_balance, dec!(0));
    }
}

#[test]
fn full_year_annual_summary() {
    let tenant = TenantId::from("acme");
    let store = loaded_store(&tenant);
    let rates = RateTableLoader::parse(RATES_CSV.as_bytes()).expect("parse rates");
    let months = aggregate_year(2024);

    let orchestrator = MultiPeriodOrchestrator::new(&store, &rates);
    let summary = orchestrator
        .run_year(
            &tenant,
            2024,
            &months,
            dec!(5000.00),
            &ExpenseCategoriesLoader::parse(EXPENSES_CSV.as_bytes()).expect("parse expenses"),
            &AnnualIncomeTaxInputs {
                opening_inventory_value: dec!(1000.00),
                closing_inventory_value: dec!(500.00),
                ..Default::default()
            },
        )
        .expect("run year");

    let annual = &summary.annual;
    // Sales 30500 across the year; purchases gross 22000.
    // COGS: 1000 + 22000 - 500 = 22500.
    assert_eq!(annual.cost_of_goods_sold, dec!(22500.00));
    assert_eq!(annual.gross_profit, dec!(8000.00));
    // Payroll 5000 + rent 1200.
    assert_eq!(annual.operating_expenses_total, dec!(6200.00));
    assert_eq!(annual.net_accounting_profit, dec!(1800.00));
    assert_eq!(annual.taxable_base, dec!(1800.00));
    assert_eq!(annual.tax_due, dec!(450.00));
}

#[test]
fn closing_balances_are_written_back_to_the_store() {
    let tenant = TenantId::from("acme");
    let store = loaded_store(&tenant);
    let rates = RateTableLoader::parse(RATES_CSV.as_bytes()).expect("parse rates");
    let months = aggregate_year(2024);

    let orchestrator = MultiPeriodOrchestrator::new(&store, &rates);
    orchestrator
        .run_year(
            &tenant,
            2024,
            &months,
            dec!(0),
            &BTreeMap::new(),
            &AnnualIncomeTaxInputs::default(),
        )
        .expect("run year");

    let february = store
        .get(&tenant, FiscalPeriod::new(2024, 2).unwrap())
        .expect("store get")
        .expect("february params");
    let march = store
        .get(&tenant, FiscalPeriod::new(2024, 3).unwrap())
        .expect("store get")
        .expect("march params");

    // February's closing balance became March's opening balance.
    assert_eq!(february.closing_credit_balance, dec!(650.00));
    assert_eq!(march.opening_credit_balance, dec!(650.00));
    assert_eq!(march.closing_credit_balance, dec!(0));
}
