pub mod calculations;
pub mod models;
pub mod schedule;

pub use calculations::{PayeCalculator, compute};
pub use models::*;
pub use schedule::{BandSchedule, ScheduleError};
