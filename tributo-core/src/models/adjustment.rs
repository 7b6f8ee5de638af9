use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A manually entered adjustment line item: a free-text label and an
/// amount. Which of the annual adjustment buckets it belongs to is
/// determined by the list that holds it, not by the item itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentItem {
    pub label: String,
    pub amount: Decimal,
}

impl AdjustmentItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// Sum of the amounts in a bucket.
    pub fn total(items: &[AdjustmentItem]) -> Decimal {
        items.iter().map(|item| item.amount).sum()
    }
}
