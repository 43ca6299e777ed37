//! Batch PAYE computation over CSV files.
//!
//! ## Input
//!
//! | Column   | Type    | Notes                                    |
//! |----------|---------|------------------------------------------|
//! | `amount` | decimal | Gross amount; negative values clamp to 0 |
//! | `period` | string  | `monthly` or `yearly`                    |
//!
//! ## Output
//!
//! `amount,period,total_tax,net_amount,effective_rate`, one row per input
//! row in file order. The effective rate is rounded to two places.

use std::io::{Read, Write};

use paye_core::calculations::common::round_half_up;
use paye_core::{PayPeriod, PayeCalculator, TaxComputation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ScheduleSet;

/// Errors that can occur while reading or writing batch files.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The CSV was structurally invalid or a field could not be deserialised.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A `period` cell was not a recognised period. `row` is 1-based,
    /// counting data rows only.
    #[error("unrecognised period '{period}' on row {row}")]
    InvalidPeriod { period: String, row: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(deserialize_with = "crate::loader::deserialize_decimal")]
    amount: Decimal,
    period: String,
}

/// One salary to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRecord {
    pub amount: Decimal,
    pub period: PayPeriod,
}

/// One computed output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub amount: Decimal,
    pub period: PayPeriod,
    pub total_tax: Decimal,
    pub net_amount: Decimal,
    pub effective_rate: Decimal,
}

impl BatchRow {
    fn from_computation(
        period: PayPeriod,
        computation: &TaxComputation,
    ) -> Self {
        Self {
            amount: computation.gross_amount,
            period,
            total_tax: computation.total_tax,
            net_amount: computation.net_amount,
            effective_rate: round_half_up(computation.effective_rate),
        }
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRecord, BatchError> {
    let period = PayPeriod::parse(&row.period).ok_or(BatchError::InvalidPeriod {
        period: row.period,
        row: row_number,
    })?;

    let amount = if row.amount < Decimal::ZERO {
        warn!(row = row_number, amount = %row.amount, "negative amount clamped to zero");
        Decimal::ZERO
    } else {
        row.amount
    };

    Ok(BatchRecord { amount, period })
}

/// Read batch records from CSV. Rows are returned in file order.
///
/// # Errors
///
/// * [`BatchError::Csv`] – if the CSV is structurally invalid or a field
///   cannot be deserialised.
/// * [`BatchError::InvalidPeriod`] – if any row names an unknown period.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchRecord>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Compute every record against `schedules`.
pub fn compute_batch(
    records: &[BatchRecord],
    schedules: &ScheduleSet,
) -> Vec<BatchRow> {
    let monthly = schedules.schedule_for(PayPeriod::Monthly);
    let yearly = schedules.schedule_for(PayPeriod::Yearly);

    let rows: Vec<BatchRow> = records
        .iter()
        .map(|record| {
            let schedule = match record.period {
                PayPeriod::Monthly => &monthly,
                PayPeriod::Yearly => &yearly,
            };
            let computation = PayeCalculator::new(schedule).calculate(record.amount);
            BatchRow::from_computation(record.period, &computation)
        })
        .collect();

    debug!(rows = rows.len(), "computed batch");
    rows
}

/// Write computed rows as CSV with a header line.
pub fn write_batch<W: Write>(
    writer: W,
    rows: &[BatchRow],
) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
