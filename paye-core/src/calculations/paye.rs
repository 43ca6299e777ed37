//! Progressive PAYE calculation over a [`BandSchedule`].
//!
//! Each band taxes only the slice of gross income that falls between the
//! previous band's upper bound and its own. Slices are never rounded; the tax
//! reported for each slice is rounded to a whole unit for display, while the
//! grand total is the rounded sum of the *unrounded* slice taxes.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::compute;
//! use paye_core::PayPeriod;
//!
//! let result = compute(dec!(200000), PayPeriod::Monthly);
//!
//! assert_eq!(result.total_tax, dec!(20000));
//! assert_eq!(result.net_amount, dec!(180000));
//! assert_eq!(result.effective_rate, dec!(10));
//! assert_eq!(result.breakdown.len(), 2);
//! assert_eq!(result.breakdown[1].amount, dec!(133333));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::calculations::common::round_to_unit;
use crate::models::{PayPeriod, TaxBandResult, TaxComputation};
use crate::schedule::BandSchedule;

/// Computes PAYE on `gross_amount` using the built-in schedule for `period`.
///
/// `gross_amount` must be non-negative; callers clamp user input before
/// calling.
pub fn compute(
    gross_amount: Decimal,
    period: PayPeriod,
) -> TaxComputation {
    let schedule = BandSchedule::for_period(period);
    PayeCalculator::new(&schedule).calculate(gross_amount)
}

/// Calculator bound to one band schedule.
#[derive(Debug, Clone, Copy)]
pub struct PayeCalculator<'a> {
    schedule: &'a BandSchedule,
}

impl<'a> PayeCalculator<'a> {
    pub fn new(schedule: &'a BandSchedule) -> Self {
        Self { schedule }
    }

    /// Runs `gross_amount` through the schedule.
    ///
    /// Total over non-negative input: a zero gross yields
    /// [`TaxComputation::zero`], and the unbounded top band absorbs whatever
    /// the bounded bands do not.
    pub fn calculate(
        &self,
        gross_amount: Decimal,
    ) -> TaxComputation {
        let mut breakdown = Vec::new();
        let mut running_tax = Decimal::ZERO;
        let mut previous_bound = Decimal::ZERO;

        for band in self.schedule.bands() {
            if gross_amount <= previous_bound {
                break;
            }

            let ceiling = match band.upper_bound {
                Some(bound) => gross_amount.min(bound),
                None => gross_amount,
            };
            let slice = ceiling - previous_bound;

            if slice > Decimal::ZERO {
                let tax = self.slice_tax(slice, band.rate);
                trace!(rate = %band.rate, slice = %slice, tax = %tax, "band slice");

                breakdown.push(TaxBandResult {
                    rate: band.rate,
                    amount: slice,
                    tax: round_to_unit(tax),
                });
                running_tax += tax;
            }

            match band.upper_bound {
                Some(bound) => previous_bound = bound,
                None => break,
            }

            if band.contains(gross_amount) {
                break;
            }
        }

        let total_tax = round_to_unit(running_tax);
        let net_amount = gross_amount - total_tax;
        let effective_rate = self.effective_rate(total_tax, gross_amount);

        debug!(
            gross = %gross_amount,
            total_tax = %total_tax,
            bands = breakdown.len(),
            "computed PAYE"
        );

        TaxComputation {
            gross_amount,
            total_tax,
            net_amount,
            effective_rate,
            breakdown,
        }
    }

    /// Unrounded tax on one slice: `slice × (rate / 100)`. The rate is scaled
    /// first so the product never exceeds the slice.
    fn slice_tax(
        &self,
        slice: Decimal,
        rate: Decimal,
    ) -> Decimal {
        slice * (rate / Decimal::ONE_HUNDRED)
    }

    /// Total tax as a percentage of gross; zero for a zero gross.
    fn effective_rate(
        &self,
        total_tax: Decimal,
        gross_amount: Decimal,
    ) -> Decimal {
        if gross_amount > Decimal::ZERO {
            total_tax / gross_amount * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}
