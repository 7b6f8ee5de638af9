use std::io::Read;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tributo_core::{
    CarryForwardParameters, CarryForwardStore, FiscalPeriod, InvalidPeriodError, PurchaseRecord,
    RateTable, SaleRecord, StoreError, TenantId,
};

/// Errors that can occur when loading the statutory rate table.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("rates file must contain exactly one data row, found {0}")]
    WrongRowCount(usize),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// Loader for the statutory rate table.
///
/// The CSV file has a header row and exactly one data row:
/// - `vat_rate`: the value-added tax rate as a decimal (e.g. 0.13)
/// - `transaction_tax_rate`: the gross-receipts rate (e.g. 0.03)
/// - `income_tax_rate`: the annual corporate income tax rate (e.g. 0.25)
///
/// Rates are configuration, so a malformed cell here is an error —
/// unlike ledger amounts, there is no safe zero fallback for a rate.
pub struct RateTableLoader;

impl RateTableLoader {
    pub fn parse<R: Read>(reader: R) -> Result<RateTable, RateTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();

        for result in csv_reader.deserialize() {
            let row: RateTable = result?;
            rows.push(row);
        }

        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(RateTableLoaderError::WrongRowCount(n)),
        }
    }
}

/// A single row of the inflation-index CSV file.
///
/// - `year`, `month`: the fiscal period the indices belong to
/// - `index_start`: the published price index at period start
/// - `index_end`: the published price index at period end
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InflationIndexRecord {
    pub year: i32,
    pub month: u32,
    pub index_start: Decimal,
    pub index_end: Decimal,
}

/// Errors that can occur when loading the inflation-index series.
#[derive(Debug, Error)]
pub enum IndexSeriesLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid fiscal period: {0}")]
    InvalidPeriod(#[from] InvalidPeriodError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<csv::Error> for IndexSeriesLoaderError {
    fn from(err: csv::Error) -> Self {
        IndexSeriesLoaderError::CsvParse(err.to_string())
    }
}

/// Loader for the monthly inflation-index series.
///
/// `load` writes each row into the carry-forward store for one tenant
/// with zeroed opening/closing balances — balances belong to the
/// orchestrator's chain, not to published index data.
pub struct IndexSeriesLoader;

impl IndexSeriesLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<InflationIndexRecord>, IndexSeriesLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: InflationIndexRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Loads index records into the store for `tenant`. Returns the
    /// number of periods written.
    pub fn load(
        store: &dyn CarryForwardStore,
        tenant: &TenantId,
        records: &[InflationIndexRecord],
    ) -> Result<usize, IndexSeriesLoaderError> {
        for record in records {
            let period = FiscalPeriod::new(record.year, record.month)?;
            let params = CarryForwardParameters {
                inflation_index_start: record.index_start,
                inflation_index_end: record.index_end,
                opening_credit_balance: Decimal::ZERO,
                closing_credit_balance: Decimal::ZERO,
            };
            store.put(tenant, period, params)?;
        }

        Ok(records.len())
    }
}

/// Loader for named operating-expense category totals.
///
/// CSV columns: `category`, `amount`. Amounts here are strict: expense
/// category files are curated configuration, not raw ledger exports.
pub struct ExpenseCategoriesLoader;

impl ExpenseCategoriesLoader {
    pub fn parse<R: Read>(
        reader: R,
    ) -> Result<std::collections::BTreeMap<String, Decimal>, LedgerCsvError> {
        #[derive(Debug, Deserialize)]
        struct ExpenseRow {
            category: String,
            amount: Decimal,
        }

        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut categories = std::collections::BTreeMap::new();

        for result in csv_reader.deserialize() {
            let row: ExpenseRow = result?;
            categories.insert(row.category, row.amount);
        }

        Ok(categories)
    }
}

/// Errors that can occur when loading ledger record CSV files.
///
/// Only structural problems (bad CSV, bad timestamps) are errors;
/// malformed amounts degrade to absent per the aggregation policy.
#[derive(Debug, Error)]
pub enum LedgerCsvError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),
}

impl From<csv::Error> for LedgerCsvError {
    fn from(err: csv::Error) -> Self {
        LedgerCsvError::CsvParse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct SaleRow {
    recorded_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_lenient_decimal")]
    amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct PurchaseRow {
    recorded_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_lenient_decimal")]
    amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_decimal")]
    credit_base: Option<Decimal>,
}

/// Parses a decimal cell leniently: blank or unparseable cells become
/// `None`, which the aggregator counts as zero. Bad amounts in raw
/// ledger exports must never abort a whole period's computation.
fn deserialize_lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<Decimal>().ok()))
}

/// Loader for raw sale and purchase ledger CSV files.
///
/// Sales CSV columns: `recorded_at` (RFC 3339), `amount`.
/// Purchases CSV columns: `recorded_at`, `amount`, `credit_base`
/// (optional; blank means the gross amount is fully creditable).
pub struct LedgerCsvLoader;

impl LedgerCsvLoader {
    pub fn parse_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, LedgerCsvError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let row: SaleRow = result?;
            records.push(SaleRecord {
                recorded_at: row.recorded_at,
                amount: row.amount,
            });
        }

        Ok(records)
    }

    pub fn parse_purchases<R: Read>(reader: R) -> Result<Vec<PurchaseRecord>, LedgerCsvError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let row: PurchaseRow = result?;
            records.push(PurchaseRecord {
                recorded_at: row.recorded_at,
                amount: row.amount,
                credit_base: row.credit_base,
            });
        }

        Ok(records)
    }
}
