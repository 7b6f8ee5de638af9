use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw sale as recorded in the ledger.
///
/// `amount` is optional: upstream data occasionally arrives without a
/// parseable amount, and the aggregation policy is to count such records
/// as zero rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub recorded_at: DateTime<Utc>,
    pub amount: Option<Decimal>,
}

/// A raw purchase as recorded in the ledger.
///
/// `credit_base` is the portion of the purchase eligible as input credit
/// when it differs from the gross amount (e.g. mixed invoices). When
/// absent, the gross amount is used as the credit base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub recorded_at: DateTime<Utc>,
    pub amount: Option<Decimal>,
    pub credit_base: Option<Decimal>,
}
