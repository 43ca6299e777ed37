use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {reason}")]
pub struct ParseAmountError {
    input: String,
    reason: String,
}

/// Digits with an optional fraction and an optional k/m/b multiplier suffix.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(-)?(\d+(?:\.\d*)?|\.\d+)([kmb])?$").expect("amount pattern is valid")
});

/// Normalizes amount input: trims whitespace and strips the currency marker,
/// thousands separators and inner spaces.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let without_symbol = trimmed
        .strip_prefix('₦')
        .or_else(|| trimmed.strip_prefix("NGN"))
        .or_else(|| trimmed.strip_prefix("ngn"))
        .unwrap_or(trimmed);
    without_symbol
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect()
}

/// Parses user input into an amount.
///
/// Accepts thousands separators (`"1,250,000"`), a leading `₦` or `NGN`, and
/// a `k`, `m` or `b` suffix (`"200k"`, `"1.5m"`). Empty input is treated as 0.
/// Negative values parse; callers clamp them.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let captures = AMOUNT_RE.captures(&normalized).ok_or_else(|| {
        tracing::warn!(input = %s, "unparsable amount");
        ParseAmountError {
            input: s.to_string(),
            reason: "expected a number such as 250000, 250,000 or 250k".to_string(),
        }
    })?;

    let digits = &captures[2];
    let value: Decimal = digits.parse().map_err(|e: rust_decimal::Error| ParseAmountError {
        input: s.to_string(),
        reason: e.to_string(),
    })?;

    let multiplier = match captures.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(suffix) if suffix == "k" => Decimal::from(1_000),
        Some(suffix) if suffix == "m" => Decimal::from(1_000_000),
        Some(_) => Decimal::from(1_000_000_000),
        None => Decimal::ONE,
    };

    let amount = value
        .checked_mul(multiplier)
        .ok_or_else(|| ParseAmountError {
            input: s.to_string(),
            reason: "amount is too large".to_string(),
        })?;

    Ok(if captures.get(1).is_some() {
        -amount
    } else {
        amount
    })
}
