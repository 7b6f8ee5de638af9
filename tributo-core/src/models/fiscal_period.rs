use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The month component of a fiscal period is outside 1..=12.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("month must be between 1 and 12, got {0}")]
pub struct InvalidPeriodError(pub u32);

/// A (year, month) pair identifying one fiscal period of one tenant.
///
/// Ordering is chronological: first by year, then by month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FiscalPeriod {
    pub year: i32,
    pub month: u32,
}

impl FiscalPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, InvalidPeriodError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(InvalidPeriodError(month))
        }
    }

    /// The period immediately following this one; December rolls into
    /// January of the next year.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// All twelve periods of `year`, in order.
    pub fn months_of(year: i32) -> Vec<Self> {
        (1..=12).map(|month| Self { year, month }).collect()
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
