use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PayPeriod;

/// Error returned when a string does not name a [`Category`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised category '{0}'")]
pub struct ParseCategoryError(pub String);

/// Error returned when a string does not name a [`PresetLevel`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised preset level '{0}'")]
pub struct ParsePresetError(pub String);

/// Earner profile used to pick a starting salary.
///
/// Categories only select preset amounts; they carry no tax semantics and
/// are never passed to the calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Employee,
    Tech,
    OilGas,
    Ritualist,
    Business,
    Creator,
}

/// Career stage within a category's preset ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetLevel {
    #[serde(rename = "min-wage", alias = "minimum-wage")]
    MinimumWage,
    #[default]
    Entry,
    Mid,
    Senior,
    Executive,
}

/// Monthly preset amounts for one category, indexed by [`PresetLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presets {
    pub minimum_wage: Decimal,
    pub entry: Decimal,
    pub mid: Decimal,
    pub senior: Decimal,
    pub executive: Decimal,
}

impl Presets {
    const fn new(amounts: [u32; 5]) -> Self {
        Self {
            minimum_wage: Decimal::from_parts(amounts[0], 0, 0, false, 0),
            entry: Decimal::from_parts(amounts[1], 0, 0, false, 0),
            mid: Decimal::from_parts(amounts[2], 0, 0, false, 0),
            senior: Decimal::from_parts(amounts[3], 0, 0, false, 0),
            executive: Decimal::from_parts(amounts[4], 0, 0, false, 0),
        }
    }

    pub fn get(
        &self,
        level: PresetLevel,
    ) -> Decimal {
        match level {
            PresetLevel::MinimumWage => self.minimum_wage,
            PresetLevel::Entry => self.entry,
            PresetLevel::Mid => self.mid,
            PresetLevel::Senior => self.senior,
            PresetLevel::Executive => self.executive,
        }
    }
}

const EMPLOYEE: Presets = Presets::new([70_000, 200_000, 450_000, 800_000, 2_000_000]);
const TECH: Presets = Presets::new([70_000, 600_000, 1_200_000, 2_500_000, 5_000_000]);
const OIL_GAS: Presets = Presets::new([70_000, 3_000_000, 5_500_000, 10_000_000, 20_000_000]);
const RITUALIST: Presets =
    Presets::new([70_000, 10_000_000, 25_000_000, 50_000_000, 100_000_000]);
const BUSINESS: Presets = Presets::new([70_000, 1_500_000, 3_500_000, 7_000_000, 15_000_000]);
const CREATOR: Presets = Presets::new([70_000, 400_000, 1_800_000, 6_000_000, 18_000_000]);

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Employee,
            Category::Tech,
            Category::OilGas,
            Category::Ritualist,
            Category::Business,
            Category::Creator,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Tech => "tech",
            Self::OilGas => "oilgas",
            Self::Ritualist => "ritualist",
            Self::Business => "business",
            Self::Creator => "creator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Tech => "Tech Bro",
            Self::OilGas => "Oil & Gas Bro",
            Self::Ritualist => "Ritualist",
            Self::Business => "Business Owner",
            Self::Creator => "Content Creator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Employee => "Salaried worker",
            Self::Tech => "Software/IT Professional",
            Self::OilGas => "Petroleum Industry",
            Self::Ritualist => "High-Net-Worth Individual",
            Self::Business => "Entrepreneur/MSME",
            Self::Creator => "Influencer/Digital Creator",
        }
    }

    /// Monthly preset amounts for this category.
    pub fn presets(&self) -> &'static Presets {
        match self {
            Self::Employee => &EMPLOYEE,
            Self::Tech => &TECH,
            Self::OilGas => &OIL_GAS,
            Self::Ritualist => &RITUALIST,
            Self::Business => &BUSINESS,
            Self::Creator => &CREATOR,
        }
    }

    /// Preset amount for `level`, scaled to `period` (yearly is 12 × monthly).
    pub fn preset(
        &self,
        level: PresetLevel,
        period: PayPeriod,
    ) -> Decimal {
        let monthly = self.presets().get(level);
        match period {
            PayPeriod::Monthly => monthly,
            PayPeriod::Yearly => monthly * Decimal::from(12),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "employee" => Some(Self::Employee),
            "tech" | "techbro" => Some(Self::Tech),
            "oilgas" | "oilgasbro" => Some(Self::OilGas),
            "ritualist" => Some(Self::Ritualist),
            "business" | "businessowner" => Some(Self::Business),
            "creator" | "contentcreator" => Some(Self::Creator),
            _ => None,
        }
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PresetLevel {
    pub fn all() -> &'static [PresetLevel] {
        &[
            PresetLevel::MinimumWage,
            PresetLevel::Entry,
            PresetLevel::Mid,
            PresetLevel::Senior,
            PresetLevel::Executive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinimumWage => "min-wage",
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Executive => "executive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MinimumWage => "Min. Wage",
            Self::Entry => "Entry Level",
            Self::Mid => "Mid-Level",
            Self::Senior => "Senior",
            Self::Executive => "Executive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min-wage" | "minwage" | "minimum-wage" | "min" => Some(Self::MinimumWage),
            "entry" => Some(Self::Entry),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "executive" | "exec" => Some(Self::Executive),
            _ => None,
        }
    }
}

impl FromStr for PresetLevel {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePresetError(s.to_string()))
    }
}

impl fmt::Display for PresetLevel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn employee_presets_match_published_ladder() {
        let presets = Category::Employee.presets();

        assert_eq!(presets.minimum_wage, dec!(70000));
        assert_eq!(presets.entry, dec!(200000));
        assert_eq!(presets.mid, dec!(450000));
        assert_eq!(presets.senior, dec!(800000));
        assert_eq!(presets.executive, dec!(2000000));
    }

    #[test]
    fn ritualist_executive_preset_is_one_hundred_million() {
        assert_eq!(
            Category::Ritualist.preset(PresetLevel::Executive, PayPeriod::Monthly),
            dec!(100000000)
        );
    }

    #[test]
    fn every_category_shares_the_minimum_wage_preset() {
        for category in Category::all() {
            assert_eq!(category.presets().minimum_wage, dec!(70000));
        }
    }

    #[test]
    fn yearly_preset_is_twelve_times_monthly() {
        let yearly = Category::Tech.preset(PresetLevel::Mid, PayPeriod::Yearly);

        assert_eq!(yearly, dec!(14400000));
    }

    #[test]
    fn presets_ascend_within_every_category() {
        for category in Category::all() {
            let amounts: Vec<Decimal> = PresetLevel::all()
                .iter()
                .map(|level| category.presets().get(*level))
                .collect();
            assert!(amounts.windows(2).all(|w| w[0] < w[1]), "{category}");
        }
    }

    #[test]
    fn category_parse_accepts_labels_and_tags() {
        assert_eq!(Category::parse("Oil & Gas Bro"), Some(Category::OilGas));
        assert_eq!(Category::parse("oilgas"), Some(Category::OilGas));
        assert_eq!(Category::parse("Content Creator"), Some(Category::Creator));
        assert_eq!(Category::parse("TECH"), Some(Category::Tech));
        assert_eq!(Category::parse("astronaut"), None);
    }

    #[test]
    fn category_from_str_reports_offending_input() {
        let err = "astronaut".parse::<Category>().unwrap_err();

        assert_eq!(err.to_string(), "unrecognised category 'astronaut'");
    }

    #[test]
    fn preset_level_parse_accepts_aliases() {
        assert_eq!(PresetLevel::parse("min"), Some(PresetLevel::MinimumWage));
        assert_eq!(PresetLevel::parse("Exec"), Some(PresetLevel::Executive));
        assert_eq!(PresetLevel::parse("junior"), None);
    }

    #[test]
    fn preset_level_serde_name_matches_display() {
        for level in PresetLevel::all() {
            let json = serde_json::to_string(level).unwrap();

            assert_eq!(json, format!("\"{level}\""));
            assert_eq!(serde_json::from_str::<PresetLevel>(&json).unwrap(), *level);
        }
        assert_eq!(
            serde_json::from_str::<PresetLevel>("\"minimum-wage\"").unwrap(),
            PresetLevel::MinimumWage
        );
    }
}
