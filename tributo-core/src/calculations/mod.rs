//! Tax determination calculations.
//!
//! The calculators here are pure, synchronous functions over already
//! aggregated numbers: the monthly turnover-tax computation, the annual
//! income-tax computation, and the orchestrator that chains them across
//! fiscal periods.

pub mod aggregation;
pub mod annual;
pub mod common;
pub mod orchestrator;
pub mod turnover;

pub use aggregation::PeriodAggregator;
pub use annual::{AnnualIncomeTaxCalculator, AnnualIncomeTaxResult};
pub use orchestrator::{MultiPeriodOrchestrator, OrchestratorError, YearSummary};
pub use turnover::{MonthlyTaxResult, TurnoverTaxCalculator, TurnoverTaxError};
