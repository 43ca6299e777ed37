//! PAYE band schedules.
//!
//! A [`BandSchedule`] is an ordered, validated list of [`TaxBand`]s. The two
//! schedules of the Nigeria Tax Act 2025 are built in:
//!
//! | Monthly upper bound | Yearly upper bound | Rate |
//! |---------------------|--------------------|------|
//! | 66,667              | 800,000            | 0%   |
//! | 250,000             | 3,000,000          | 15%  |
//! | 1,000,000           | 12,000,000         | 18%  |
//! | 2,083,333           | 25,000,000         | 21%  |
//! | 4,166,667           | 50,000,000         | 23%  |
//! | unbounded           | unbounded          | 25%  |
//!
//! The monthly table is its own published table, not the yearly one divided
//! by twelve: the tax-free band ends at 66,667 a month but 800,000 a year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PayPeriod, TaxBand};

/// Reasons a list of bands cannot form a schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no bands")]
    Empty,

    #[error("band {index} has rate {rate}, expected a percentage between 0 and 100")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("band {index} upper bound {bound} must be positive")]
    NonPositiveBound { index: usize, bound: Decimal },

    #[error("band {index} upper bound {bound} does not exceed the previous bound {previous}")]
    NotAscending {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("band {index} is unbounded but is not the last band")]
    UnboundedBeforeEnd { index: usize },

    #[error("the last band must be unbounded")]
    BoundedTop,
}

/// Ordered PAYE bands covering every non-negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBand>", into = "Vec<TaxBand>")]
pub struct BandSchedule {
    bands: Vec<TaxBand>,
}

const MONTHLY_BANDS: [TaxBand; 6] = [
    TaxBand::bounded(dec!(66667), dec!(0)),
    TaxBand::bounded(dec!(250000), dec!(15)),
    TaxBand::bounded(dec!(1000000), dec!(18)),
    TaxBand::bounded(dec!(2083333), dec!(21)),
    TaxBand::bounded(dec!(4166667), dec!(23)),
    TaxBand::unbounded(dec!(25)),
];

const YEARLY_BANDS: [TaxBand; 6] = [
    TaxBand::bounded(dec!(800000), dec!(0)),
    TaxBand::bounded(dec!(3000000), dec!(15)),
    TaxBand::bounded(dec!(12000000), dec!(18)),
    TaxBand::bounded(dec!(25000000), dec!(21)),
    TaxBand::bounded(dec!(50000000), dec!(23)),
    TaxBand::unbounded(dec!(25)),
];

impl BandSchedule {
    /// Validates `bands` and wraps them in a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the list is empty, a rate is outside
    /// 0–100, bounds are not strictly ascending and positive, or the
    /// unbounded band is missing or not last.
    pub fn new(bands: Vec<TaxBand>) -> Result<Self, ScheduleError> {
        if bands.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last = bands.len() - 1;
        let mut previous = Decimal::ZERO;

        for (index, band) in bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE_HUNDRED {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: band.rate,
                });
            }

            match band.upper_bound {
                Some(bound) if bound <= Decimal::ZERO => {
                    return Err(ScheduleError::NonPositiveBound { index, bound });
                }
                Some(bound) if bound <= previous => {
                    return Err(ScheduleError::NotAscending {
                        index,
                        bound,
                        previous,
                    });
                }
                Some(_) if index == last => return Err(ScheduleError::BoundedTop),
                Some(bound) => previous = bound,
                None if index != last => {
                    return Err(ScheduleError::UnboundedBeforeEnd { index });
                }
                None => {}
            }
        }

        Ok(Self { bands })
    }

    /// Built-in schedule for amounts expressed per month.
    pub fn monthly() -> Self {
        Self {
            bands: MONTHLY_BANDS.to_vec(),
        }
    }

    /// Built-in schedule for amounts expressed per year.
    pub fn yearly() -> Self {
        Self {
            bands: YEARLY_BANDS.to_vec(),
        }
    }

    pub fn for_period(period: PayPeriod) -> Self {
        match period {
            PayPeriod::Monthly => Self::monthly(),
            PayPeriod::Yearly => Self::yearly(),
        }
    }

    pub fn bands(&self) -> &[TaxBand] {
        &self.bands
    }

    /// Lower bound of each band paired with the band itself.
    pub fn ranges(&self) -> impl Iterator<Item = (Decimal, &TaxBand)> {
        let lowers = std::iter::once(Decimal::ZERO)
            .chain(self.bands.iter().filter_map(|band| band.upper_bound));
        lowers.zip(self.bands.iter())
    }
}

impl TryFrom<Vec<TaxBand>> for BandSchedule {
    type Error = ScheduleError;

    fn try_from(bands: Vec<TaxBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BandSchedule> for Vec<TaxBand> {
    fn from(schedule: BandSchedule) -> Self {
        schedule.bands
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn built_in_schedules_pass_validation() {
        for schedule in [BandSchedule::monthly(), BandSchedule::yearly()] {
            let rebuilt = BandSchedule::new(schedule.bands().to_vec());
            assert_eq!(rebuilt, Ok(schedule));
        }
    }

    #[test]
    fn monthly_tax_free_band_is_not_a_twelfth_of_yearly() {
        let monthly = BandSchedule::monthly().bands()[0].upper_bound.unwrap();
        let yearly = BandSchedule::yearly().bands()[0].upper_bound.unwrap();

        assert_eq!(monthly, dec!(66667));
        assert_eq!(yearly, dec!(800000));
        assert!(monthly * dec!(12) != yearly);
    }

    #[test]
    fn for_period_selects_matching_table() {
        assert_eq!(
            BandSchedule::for_period(PayPeriod::Yearly),
            BandSchedule::yearly()
        );
        assert_eq!(
            BandSchedule::for_period(PayPeriod::Monthly),
            BandSchedule::monthly()
        );
    }

    #[test]
    fn ranges_pair_lower_bounds_with_bands() {
        let schedule = BandSchedule::monthly();
        let lowers: Vec<Decimal> = schedule.ranges().map(|(lower, _)| lower).collect();

        assert_eq!(
            lowers,
            vec![
                dec!(0),
                dec!(66667),
                dec!(250000),
                dec!(1000000),
                dec!(2083333),
                dec!(4166667),
            ]
        );
    }

    #[test]
    fn new_rejects_empty_schedule() {
        assert_eq!(BandSchedule::new(vec![]), Err(ScheduleError::Empty));
    }

    #[test]
    fn new_rejects_bounded_top_band() {
        let bands = vec![TaxBand::bounded(dec!(100), dec!(0))];

        assert_eq!(BandSchedule::new(bands), Err(ScheduleError::BoundedTop));
    }

    #[test]
    fn new_rejects_unbounded_inner_band() {
        let bands = vec![TaxBand::unbounded(dec!(0)), TaxBand::unbounded(dec!(10))];

        assert_eq!(
            BandSchedule::new(bands),
            Err(ScheduleError::UnboundedBeforeEnd { index: 0 })
        );
    }

    #[test]
    fn new_rejects_descending_bounds() {
        let bands = vec![
            TaxBand::bounded(dec!(500), dec!(0)),
            TaxBand::bounded(dec!(400), dec!(10)),
            TaxBand::unbounded(dec!(20)),
        ];

        assert_eq!(
            BandSchedule::new(bands),
            Err(ScheduleError::NotAscending {
                index: 1,
                bound: dec!(400),
                previous: dec!(500),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one_hundred() {
        let bands = vec![TaxBand::unbounded(dec!(101))];

        assert_eq!(
            BandSchedule::new(bands),
            Err(ScheduleError::InvalidRate {
                index: 0,
                rate: dec!(101),
            })
        );
    }

    #[test]
    fn new_rejects_zero_bound() {
        let bands = vec![
            TaxBand::bounded(dec!(0), dec!(0)),
            TaxBand::unbounded(dec!(10)),
        ];

        assert_eq!(
            BandSchedule::new(bands),
            Err(ScheduleError::NonPositiveBound {
                index: 0,
                bound: dec!(0),
            })
        );
    }

    #[test]
    fn single_unbounded_band_is_a_flat_tax() {
        let schedule = BandSchedule::new(vec![TaxBand::unbounded(dec!(7.5))]).unwrap();

        assert_eq!(schedule.bands().len(), 1);
    }

    #[test]
    fn deserializing_validates_bands() {
        let json = r#"[{"upper_bound":"100","rate":"0"}]"#;
        let result: Result<BandSchedule, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }
}
