use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBandResult;

/// Result of running a gross amount through a band schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    pub gross_amount: Decimal,
    pub total_tax: Decimal,
    pub net_amount: Decimal,
    /// `total_tax / gross_amount × 100`, or zero for a zero gross.
    pub effective_rate: Decimal,
    /// Non-empty band slices, lowest band first.
    pub breakdown: Vec<TaxBandResult>,
}

impl TaxComputation {
    /// The all-zero computation produced for a zero gross amount.
    pub fn zero() -> Self {
        Self {
            gross_amount: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            breakdown: Vec::new(),
        }
    }

    /// Highest rate any part of the gross amount was taxed at.
    pub fn marginal_rate(&self) -> Decimal {
        self.breakdown
            .last()
            .map(|band| band.rate)
            .unwrap_or(Decimal::ZERO)
    }
}
