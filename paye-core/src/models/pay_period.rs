use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a [`PayPeriod`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised pay period '{0}' (expected 'monthly' or 'yearly')")]
pub struct ParsePeriodError(pub String);

/// The reporting period a gross amount is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl PayPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Noun used in "per month" / "per year" captions.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Yearly => "year",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "annually" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl FromStr for PayPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
