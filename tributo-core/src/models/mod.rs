mod adjustment;
mod carry_forward;
mod fiscal_period;
mod ledger_record;
mod operating;
mod period_totals;
mod rate_table;
mod tenant;

pub use adjustment::AdjustmentItem;
pub use carry_forward::CarryForwardParameters;
pub use fiscal_period::{FiscalPeriod, InvalidPeriodError};
pub use ledger_record::{PurchaseRecord, SaleRecord};
pub use operating::{AnnualIncomeTaxInputs, AnnualOperatingData};
pub use period_totals::PeriodTotals;
pub use rate_table::RateTable;
pub use tenant::TenantId;
