//! Text boundary helpers: soft parsing of typed numbers, discount-rate
//! units and display formatting.
//!
//! Nothing here ever yields NaN. Text that does not parse is `None`, and the
//! caller chooses whether that means "keep the previous value" or "zero".

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result, ValidationError};

/// Parses user-typed numeric text such as `"$1,000,000"` or `"20"`.
///
/// Every character other than digits, `.` and `-` is dropped first.
/// Returns `None` for empty or malformed input.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Parses `text`, keeping `previous` when it does not parse.
pub fn parse_number_or(text: &str, previous: Decimal) -> Decimal {
    parse_number(text).unwrap_or(previous)
}

/// Parses `text`, treating anything unparseable as zero.
pub fn parse_number_or_zero(text: &str) -> Decimal {
    parse_number_or(text, Decimal::ZERO)
}

/// Unit a discount rate is expressed in at the input boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    /// 0.20 means 20%
    #[default]
    Fraction,
    /// 20 means 20%
    Percent,
}

impl FromStr for RateUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fraction" => Ok(RateUnit::Fraction),
            "percent" | "percentage" => Ok(RateUnit::Percent),
            _ => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown rate unit '{}'",
                s
            )))),
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateUnit::Fraction => f.write_str("fraction"),
            RateUnit::Percent => f.write_str("percent"),
        }
    }
}

/// Converts a boundary discount rate to the canonical 0-1 fraction.
pub fn normalize_discount_rate(value: Decimal, unit: RateUnit) -> Decimal {
    match unit {
        RateUnit::Fraction => value,
        RateUnit::Percent => value / dec!(100),
    }
}

/// Whole-dollar USD amount, e.g. `$1,000,000`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let grouped = group_thousands(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Number with thousands separators and at most three fraction digits,
/// e.g. `1,000,000` or `714,285.714`.
pub fn format_with_commas(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, group_thousands(int_part), frac),
        None => format!("{}{}", sign, group_thousands(int_part)),
    }
}

/// Percentage with two decimals, e.g. `7.14%`.
pub fn format_percentage(percentage: Decimal) -> String {
    let rounded = percentage.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.2}%", rounded)
}

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
