//! PAYE calculation logic.
//!
//! [`paye`] holds the banded calculator; [`common`] holds the rounding rules
//! shared with the presentation layers.

pub mod common;
pub mod paye;

pub use paye::{PayeCalculator, compute};
