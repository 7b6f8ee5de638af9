use std::collections::BTreeMap;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tributo_core::calculations::{MultiPeriodOrchestrator, PeriodAggregator};
use tributo_core::{
    AnnualIncomeTaxInputs, FiscalPeriod, InMemoryCarryForwardStore, PeriodTotals, TenantId,
};
use tributo_data::{
    ExpenseCategoriesLoader, IndexSeriesLoader, LedgerCsvLoader, RateTableLoader,
};

/// Run a tenant's fiscal year through the tax determination engine and
/// print the monthly turnover-tax results and the annual income-tax
/// summary.
///
/// Expects four CSV files: the statutory rate table, the monthly
/// inflation-index series, and the raw sale and purchase ledgers.
#[derive(Parser, Debug)]
#[command(name = "tributo-report")]
#[command(version, about, long_about = None)]
struct Args {
    /// Tenant identifier the computation is scoped to
    #[arg(short, long)]
    tenant: String,

    /// Fiscal year to compute
    #[arg(short, long)]
    year: i32,

    /// Path to the rate table CSV (vat_rate,transaction_tax_rate,income_tax_rate)
    #[arg(long)]
    rates: PathBuf,

    /// Path to the inflation-index CSV (year,month,index_start,index_end)
    #[arg(long)]
    indices: PathBuf,

    /// Path to the sales ledger CSV (recorded_at,amount)
    #[arg(long)]
    sales: PathBuf,

    /// Path to the purchases ledger CSV (recorded_at,amount,credit_base)
    #[arg(long)]
    purchases: PathBuf,

    /// Optional operating-expense categories CSV (category,amount)
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Payroll total for the year
    #[arg(long, default_value = "0")]
    payroll: Decimal,

    /// Inventory value at the start of the year
    #[arg(long, default_value = "0")]
    opening_inventory: Decimal,

    /// Inventory value at the end of the year
    #[arg(long, default_value = "0")]
    closing_inventory: Decimal,
}

fn month_start(
    year: i32,
    month: u32,
) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .with_context(|| format!("invalid month start {year}-{month:02}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let tenant = TenantId::from(args.tenant.as_str());

    let rates_file = File::open(&args.rates)
        .with_context(|| format!("failed to open: {}", args.rates.display()))?;
    let rates = RateTableLoader::parse(rates_file)
        .with_context(|| format!("failed to parse rate table: {}", args.rates.display()))?;

    let store = InMemoryCarryForwardStore::new();
    let indices_file = File::open(&args.indices)
        .with_context(|| format!("failed to open: {}", args.indices.display()))?;
    let index_records = IndexSeriesLoader::parse(indices_file)
        .with_context(|| format!("failed to parse index series: {}", args.indices.display()))?;
    let loaded = IndexSeriesLoader::load(&store, &tenant, &index_records)
        .context("failed to load index series into store")?;
    info!(loaded, "inflation-index periods loaded");

    let sales_file = File::open(&args.sales)
        .with_context(|| format!("failed to open: {}", args.sales.display()))?;
    let sales = LedgerCsvLoader::parse_sales(sales_file)
        .with_context(|| format!("failed to parse sales ledger: {}", args.sales.display()))?;

    let purchases_file = File::open(&args.purchases)
        .with_context(|| format!("failed to open: {}", args.purchases.display()))?;
    let purchases = LedgerCsvLoader::parse_purchases(purchases_file).with_context(|| {
        format!("failed to parse purchases ledger: {}", args.purchases.display())
    })?;
    info!(
        sales = sales.len(),
        purchases = purchases.len(),
        "ledger records loaded"
    );

    let expense_categories = match &args.expenses {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open: {}", path.display()))?;
            ExpenseCategoriesLoader::parse(file)
                .with_context(|| format!("failed to parse expenses: {}", path.display()))?
        }
        None => BTreeMap::new(),
    };

    let mut months: BTreeMap<u32, PeriodTotals> = BTreeMap::new();
    for period in FiscalPeriod::months_of(args.year) {
        let start = month_start(period.year, period.month)?;
        let end_period = period.next();
        let end = month_start(end_period.year, end_period.month)?;
        months.insert(
            period.month,
            PeriodAggregator::aggregate(&sales, &purchases, start, end),
        );
    }

    let inputs = AnnualIncomeTaxInputs {
        opening_inventory_value: args.opening_inventory,
        closing_inventory_value: args.closing_inventory,
        ..Default::default()
    };

    let orchestrator = MultiPeriodOrchestrator::new(&store, &rates);
    let summary = orchestrator
        .run_year(
            &tenant,
            args.year,
            &months,
            args.payroll,
            &expense_categories,
            &inputs,
        )
        .with_context(|| format!("failed to compute fiscal year {}", args.year))?;

    println!("Monthly turnover tax — tenant {} year {}", tenant, args.year);
    println!("month  turnover_due  transaction_due  carry_forward");
    for (period, result) in FiscalPeriod::months_of(args.year)
        .iter()
        .zip(&summary.monthly)
    {
        println!(
            "{}  {:>12}  {:>15}  {:>13}",
            period,
            result.turnover_tax_due,
            result.transaction_tax_due,
            result.new_closing_credit_balance
        );
    }

    let annual = &summary.annual;
    println!();
    println!("Annual income tax — year {}", args.year);
    println!("cost of goods sold      {:>14}", annual.cost_of_goods_sold);
    println!("gross profit            {:>14}", annual.gross_profit);
    println!("operating expenses      {:>14}", annual.operating_expenses_total);
    println!("non-monetary expenses   {:>14}", annual.non_monetary_expenses_total);
    println!("net accounting profit   {:>14}", annual.net_accounting_profit);
    println!("fiscal adjustments      {:>14}", annual.fiscal_adjustments_total);
    println!("exempt income           {:>14}", annual.exempt_income_total);
    println!("taxable base            {:>14}", annual.taxable_base);
    println!("tax due                 {:>14}", annual.tax_due);

    Ok(())
}
