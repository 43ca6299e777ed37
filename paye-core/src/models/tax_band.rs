use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal band of a PAYE schedule.
///
/// `upper_bound` is the cumulative income level at which the band ends;
/// `None` marks the unbounded top band. `rate` is a percentage (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub const fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }

    /// True when `amount` does not extend past this band.
    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        self.upper_bound.is_none_or(|bound| amount <= bound)
    }
}

/// The slice of a gross amount that fell inside one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBandResult {
    /// Rate of the band, as a percentage.
    pub rate: Decimal,
    /// Income taxed at `rate`. Never rounded, always positive.
    pub amount: Decimal,
    /// `amount × rate / 100` rounded to a whole unit.
    pub tax: Decimal,
}
