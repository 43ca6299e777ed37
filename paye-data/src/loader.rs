use std::io::Read;

use paye_core::{BandSchedule, PayPeriod, ScheduleError, TaxBand};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading band schedule data.
#[derive(Debug, Error)]
pub enum ScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised period '{period}' on row {row}")]
    InvalidPeriod { period: String, row: usize },

    #[error("invalid {period} schedule: {source}")]
    InvalidSchedule {
        period: PayPeriod,
        #[source]
        source: ScheduleError,
    },

    #[error("CSV contains no bands")]
    NoBands,
}

impl From<csv::Error> for ScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        ScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a band schedule CSV file.
///
/// - `period`: `monthly` or `yearly`
/// - `upper_bound`: cumulative income at which the band ends (empty for unbounded)
/// - `rate`: marginal rate as a percentage (e.g. `15` for 15%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BandRecord {
    pub period: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

fn parse_decimal_cell<E: serde::de::Error>(cell: &str) -> Result<Decimal, E> {
    let cleaned = cell.trim().replace(',', "");
    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(E::custom)
}

/// Reads a decimal from the raw cell text so no digits pass through `f64`.
pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_decimal_cell(&s)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_decimal_cell(&s).map(Some),
        None => Ok(None),
    }
}

/// Band schedules read from a file, one per period at most.
///
/// A period missing from the file falls back to the built-in schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSet {
    pub monthly: Option<BandSchedule>,
    pub yearly: Option<BandSchedule>,
}

impl ScheduleSet {
    pub fn get(
        &self,
        period: PayPeriod,
    ) -> Option<&BandSchedule> {
        match period {
            PayPeriod::Monthly => self.monthly.as_ref(),
            PayPeriod::Yearly => self.yearly.as_ref(),
        }
    }

    /// The loaded schedule for `period`, or the built-in one.
    pub fn schedule_for(
        &self,
        period: PayPeriod,
    ) -> BandSchedule {
        self.get(period)
            .cloned()
            .unwrap_or_else(|| BandSchedule::for_period(period))
    }
}

/// Loader for band schedules from CSV files.
///
/// The CSV has columns `period,upper_bound,rate`. Rows for each period must
/// be listed lowest band first and end with a single unbounded band.
///
/// ```csv
/// period,upper_bound,rate
/// monthly,66667,0
/// monthly,,15
/// ```
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Parse band records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BandRecord>, ScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BandRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Group records by period and validate each group into a schedule.
    ///
    /// Records keep their file order within each period.
    pub fn build(records: &[BandRecord]) -> Result<ScheduleSet, ScheduleLoaderError> {
        if records.is_empty() {
            return Err(ScheduleLoaderError::NoBands);
        }

        let mut monthly = Vec::new();
        let mut yearly = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let period = PayPeriod::parse(&record.period).ok_or_else(|| {
                ScheduleLoaderError::InvalidPeriod {
                    period: record.period.clone(),
                    row: idx + 1,
                }
            })?;

            let band = TaxBand {
                upper_bound: record.upper_bound,
                rate: record.rate,
            };
            match period {
                PayPeriod::Monthly => monthly.push(band),
                PayPeriod::Yearly => yearly.push(band),
            }
        }

        debug!(
            monthly = monthly.len(),
            yearly = yearly.len(),
            "grouped schedule bands"
        );

        Ok(ScheduleSet {
            monthly: Self::validate(PayPeriod::Monthly, monthly)?,
            yearly: Self::validate(PayPeriod::Yearly, yearly)?,
        })
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<ScheduleSet, ScheduleLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }

    fn validate(
        period: PayPeriod,
        bands: Vec<TaxBand>,
    ) -> Result<Option<BandSchedule>, ScheduleLoaderError> {
        if bands.is_empty() {
            return Ok(None);
        }
        BandSchedule::new(bands)
            .map(Some)
            .map_err(|source| ScheduleLoaderError::InvalidSchedule { period, source })
    }
}
