//! Text rendering of PAYE computations.
//!
//! Amounts are shown in Naira with comma thousands separators. Fractions are
//! shown only when present, to at most two places.

use std::fmt::Write as _;

use paye_core::calculations::common::round_half_up;
use paye_core::{BandSchedule, Category, PayPeriod, PresetLevel, TaxBandResult, TaxComputation};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "₦";

/// Inserts a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats a number with comma separators, e.g. `1,234,567.5`.
pub fn format_number(value: Decimal) -> String {
    let rounded = round_half_up(value).normalize();
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    match fraction {
        Some(fraction) => format!("{sign}{}.{fraction}", group_thousands(integer)),
        None => format!("{sign}{}", group_thousands(integer)),
    }
}

/// Formats an amount with the Naira symbol, e.g. `₦1,250,000`.
pub fn format_naira(value: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_number(value))
}

/// Short form used for slider captions: `₦1.5M`, `₦200k`, `₦950`.
pub fn format_naira_compact(value: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    if value >= million {
        let scaled = (value / million).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{CURRENCY_SYMBOL}{scaled:.1}M")
    } else if value >= thousand {
        let scaled = (value / thousand).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{CURRENCY_SYMBOL}{scaled:.0}k")
    } else {
        let scaled = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{CURRENCY_SYMBOL}{scaled:.0}")
    }
}

/// Percentage to two places, e.g. `10.00%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate))
}

/// Label for a band: `Free` for the zero-rate band, `15%` otherwise.
pub fn band_label(rate: Decimal) -> String {
    if rate.is_zero() {
        "Free".to_string()
    } else {
        format!("{}%", rate.normalize())
    }
}

/// How much of every ₦1,000 earned is kept and how much is paid in tax.
pub fn per_thousand(effective_rate: Decimal) -> (Decimal, Decimal) {
    let thousand = Decimal::from(1_000);
    let tax = (effective_rate / Decimal::ONE_HUNDRED * thousand)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let keep = (thousand - effective_rate / Decimal::ONE_HUNDRED * thousand)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (keep, tax)
}

/// The three-line summary offered for copying.
pub fn summary_text(
    computation: &TaxComputation,
    period: PayPeriod,
) -> String {
    format!(
        "Income: {} {}\nTax: {} ({})\nTake-Home: {}",
        format_naira(computation.gross_amount),
        period,
        format_naira(computation.total_tax),
        format_rate(computation.effective_rate),
        format_naira(computation.net_amount),
    )
}

fn breakdown_line(band: &TaxBandResult) -> String {
    format!(
        "  {:<6} on {:<18} {:>16}",
        band_label(band.rate),
        format_naira(band.amount),
        format_naira(band.tax),
    )
}

/// Full results report for one computation.
pub fn render_report(
    computation: &TaxComputation,
    period: PayPeriod,
    category: Category,
) -> String {
    let mut out = String::new();
    let (keep, paid) = per_thousand(computation.effective_rate);

    let _ = writeln!(
        out,
        "Take-Home Pay   {} per {}",
        format_naira(computation.net_amount),
        period.unit()
    );
    let _ = writeln!(out, "Tax Paid        {}", format_naira(computation.total_tax));
    let _ = writeln!(out, "Effective Rate  {}", format_rate(computation.effective_rate));
    let _ = writeln!(out);
    let _ = writeln!(out, "Tax Breakdown");
    if computation.breakdown.is_empty() {
        let _ = writeln!(out, "  (no taxable income)");
    }
    for band in &computation.breakdown {
        let _ = writeln!(out, "{}", breakdown_line(band));
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Per {CURRENCY_SYMBOL}1,000 earned: you keep {}, tax paid {}",
        format_naira(keep),
        format_naira(paid)
    );
    let _ = write!(out, "Calculating for: {}", category.label());
    out
}

/// The five presets of `category` scaled to `period`.
pub fn render_presets(
    category: Category,
    period: PayPeriod,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}), {} amounts",
        category.label(),
        category.description(),
        period
    );
    for level in PresetLevel::all() {
        let _ = writeln!(
            out,
            "  {:<10} {:<12} {:>16}",
            level.as_str(),
            level.label(),
            format_naira(category.preset(*level, period))
        );
    }
    out
}

/// The bands of `schedule`, one per line with their ranges.
pub fn render_bands(
    schedule: &BandSchedule,
    period: PayPeriod,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "PAYE bands ({period})");
    for (lower, band) in schedule.ranges() {
        let range = match band.upper_bound {
            Some(upper) => format!("{} - {}", format_naira(lower), format_naira(upper)),
            None => format!("above {}", format_naira(lower)),
        };
        let _ = writeln!(out, "  {:<6} {}", band_label(band.rate), range);
    }
    out
}

#[cfg(test)]
mod tests {
    use paye_core::compute;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(dec!(0)), "0");
        assert_eq!(format_number(dec!(999)), "999");
        assert_eq!(format_number(dec!(1000)), "1,000");
        assert_eq!(format_number(dec!(133333)), "133,333");
        assert_eq!(format_number(dec!(1200000000)), "1,200,000,000");
    }

    #[test]
    fn format_number_keeps_short_fractions() {
        assert_eq!(format_number(dec!(66667.50)), "66,667.5");
        assert_eq!(format_number(dec!(1234.567)), "1,234.57");
        assert_eq!(format_number(dec!(20000.00)), "20,000");
    }

    #[test]
    fn format_number_handles_negatives() {
        assert_eq!(format_number(dec!(-1234567)), "-1,234,567");
    }

    #[test]
    fn format_naira_prefixes_symbol() {
        assert_eq!(format_naira(dec!(180000)), "₦180,000");
    }

    #[test]
    fn format_naira_compact_matches_slider_captions() {
        assert_eq!(format_naira_compact(dec!(100000000)), "₦100.0M");
        assert_eq!(format_naira_compact(dec!(1200000000)), "₦1200.0M");
        assert_eq!(format_naira_compact(dec!(1500000)), "₦1.5M");
        assert_eq!(format_naira_compact(dec!(200000)), "₦200k");
        assert_eq!(format_naira_compact(dec!(950)), "₦950");
        assert_eq!(format_naira_compact(dec!(0)), "₦0");
    }

    #[test]
    fn format_rate_always_shows_two_places() {
        assert_eq!(format_rate(dec!(10)), "10.00%");
        assert_eq!(format_rate(dec!(12.16666)), "12.17%");
        assert_eq!(format_rate(dec!(0)), "0.00%");
    }

    #[test]
    fn band_label_marks_zero_rate_free() {
        assert_eq!(band_label(dec!(0)), "Free");
        assert_eq!(band_label(dec!(15)), "15%");
        assert_eq!(band_label(dec!(7.50)), "7.5%");
    }

    #[test]
    fn per_thousand_splits_by_effective_rate() {
        assert_eq!(per_thousand(dec!(10)), (dec!(900), dec!(100)));
        assert_eq!(per_thousand(dec!(0)), (dec!(1000), dec!(0)));
    }

    #[test]
    fn summary_text_has_three_lines() {
        let computation = compute(dec!(200000), PayPeriod::Monthly);

        assert_eq!(
            summary_text(&computation, PayPeriod::Monthly),
            "Income: ₦200,000 monthly\nTax: ₦20,000 (10.00%)\nTake-Home: ₦180,000"
        );
    }

    #[test]
    fn render_report_lists_every_band() {
        let computation = compute(dec!(200000), PayPeriod::Monthly);

        let report = render_report(&computation, PayPeriod::Monthly, Category::Employee);

        assert!(report.starts_with("Take-Home Pay   ₦180,000 per month\n"));
        assert!(report.contains("Free   on ₦66,667"));
        assert!(report.contains("15%    on ₦133,333"));
        assert!(report.contains("₦20,000"));
        assert!(report.contains("you keep ₦900, tax paid ₦100"));
        assert!(report.ends_with("Calculating for: Employee"));
    }

    #[test]
    fn render_report_notes_empty_breakdown() {
        let computation = compute(dec!(0), PayPeriod::Yearly);

        let report = render_report(&computation, PayPeriod::Yearly, Category::Tech);

        assert!(report.contains("(no taxable income)"));
        assert!(report.contains("per year"));
    }

    #[test]
    fn render_presets_scales_yearly() {
        let text = render_presets(Category::Employee, PayPeriod::Yearly);

        assert!(text.contains("₦2,400,000"));
        assert!(text.contains("₦24,000,000"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn render_bands_shows_open_top_band() {
        let text = render_bands(&BandSchedule::monthly(), PayPeriod::Monthly);

        assert!(text.contains("Free   ₦0 - ₦66,667"));
        assert!(text.contains("25%    above ₦4,166,667"));
    }
}
