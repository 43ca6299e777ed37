//! CSV input and output for PAYE band schedules and salary batches.

pub mod batch;
mod loader;

pub use batch::{BatchError, BatchRecord, BatchRow, compute_batch, read_batch, write_batch};
pub use loader::{BandRecord, ScheduleLoader, ScheduleLoaderError, ScheduleSet};
