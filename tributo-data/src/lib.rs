//! CSV ingestion for the tax determination engine.
//!
//! Turns configuration and ledger-fact CSV files into the typed inputs
//! `tributo-core` consumes: the statutory rate table, the monthly
//! inflation-index series, and raw sale/purchase records.

pub mod loader;

pub use loader::{
    ExpenseCategoriesLoader, IndexSeriesLoader, IndexSeriesLoaderError, InflationIndexRecord,
    LedgerCsvError, LedgerCsvLoader, RateTableLoader, RateTableLoaderError,
};
