//! Money and percentage primitives
//!
//! Form fields arrive as raw strings or numbers and are frequently invalid
//! mid-keystroke, so nothing here returns an error: anything that does not
//! parse to a finite, non-negative number degrades to zero.
//!
//! Arithmetic is done in `Decimal`; values are converted back to `f64` and
//! rounded to 2 decimal places (half away from zero) only at the output
//! boundary.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Upper bound for percentages that cannot exceed the whole amount
const MAX_DISCOUNT_PERCENT: f64 = 100.0;

/// Raw numeric user input, either a JSON number or the text of a form field
///
/// Any other JSON value (`true`, `{}`, `[1]`) lands in `Other` and reads as
/// malformed input rather than failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    /// Parse into a finite `f64`, or `None` when the input is malformed
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => parse_text(s)?,
            RawNumber::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

fn parse_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "inf", "NaN" and friends parse as f64 but are not amounts
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Which ceiling applies when clamping a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentKind {
    /// Discount: clamped to [0, 100]
    Discount,
    /// Tax or withholding: clamped to [0, ∞), compound surcharges may exceed 100
    Rate,
}

/// Parse a semantically non-negative amount (quantity, price, charges)
///
/// Missing, empty, unparsable, non-finite and negative input all yield `0`.
pub fn to_non_negative_number(raw: Option<&RawNumber>) -> f64 {
    raw.and_then(RawNumber::parse).map_or(0.0, non_negative)
}

/// Parse a percentage and clamp it into the range allowed for `kind`
pub fn clamp_percent(raw: Option<&RawNumber>, kind: PercentKind) -> f64 {
    let value = to_non_negative_number(raw);
    clamp_percent_value(value, kind)
}

/// Clamp an already-typed percentage; NaN and negatives become `0`
pub fn clamp_percent_value(value: f64, kind: PercentKind) -> f64 {
    let value = non_negative(value);
    match kind {
        PercentKind::Discount => value.min(MAX_DISCOUNT_PERCENT),
        PercentKind::Rate => value,
    }
}

/// Coerce a typed value to a finite, non-negative number
#[inline]
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Round to 2 decimal places, half away from zero; non-finite input yields `0`
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    to_f64(to_decimal(value))
}

/// Format an amount for display with exactly 2 decimals
///
/// Non-finite values render as `"0.00"` rather than `"NaN"`.
pub fn format_money(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Convert f64 to Decimal for calculation
///
/// Values outside the `Decimal` range (or NaN/Infinity) are logged and
/// treated as zero so they never reach a rendered total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::warn!(value = ?value, "Non-representable f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round a Decimal amount to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value)
        .to_f64()
        .filter(|v| v.is_finite())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawNumber {
        RawNumber::from(s)
    }

    #[test]
    fn test_missing_and_empty_are_zero() {
        assert_eq!(to_non_negative_number(None), 0.0);
        assert_eq!(to_non_negative_number(Some(&text(""))), 0.0);
        assert_eq!(to_non_negative_number(Some(&text("   "))), 0.0);
    }

    #[test]
    fn test_malformed_text_is_zero() {
        for s in ["abc", "12abc", "1.2.3", "NaN", "inf", "-inf", "Infinity", "--5"] {
            assert_eq!(to_non_negative_number(Some(&text(s))), 0.0, "input {:?}", s);
        }
    }

    #[test]
    fn test_valid_text() {
        assert_eq!(to_non_negative_number(Some(&text("12.50"))), 12.5);
        assert_eq!(to_non_negative_number(Some(&text(" 7 "))), 7.0);
        assert_eq!(to_non_negative_number(Some(&text("1e3"))), 1000.0);
        assert_eq!(to_non_negative_number(Some(&text(".5"))), 0.5);
    }

    #[test]
    fn test_negative_is_zero() {
        assert_eq!(to_non_negative_number(Some(&text("-4"))), 0.0);
        assert_eq!(to_non_negative_number(Some(&RawNumber::Number(-0.01))), 0.0);
    }

    #[test]
    fn test_non_finite_number_is_zero() {
        assert_eq!(to_non_negative_number(Some(&RawNumber::Number(f64::NAN))), 0.0);
        assert_eq!(
            to_non_negative_number(Some(&RawNumber::Number(f64::INFINITY))),
            0.0
        );
    }

    #[test]
    fn test_clamp_discount_percent() {
        assert_eq!(clamp_percent(Some(&text("150")), PercentKind::Discount), 100.0);
        assert_eq!(clamp_percent(Some(&text("-10")), PercentKind::Discount), 0.0);
        assert_eq!(clamp_percent(Some(&text("12.5")), PercentKind::Discount), 12.5);
        assert_eq!(clamp_percent(None, PercentKind::Discount), 0.0);
    }

    #[test]
    fn test_clamp_rate_percent_is_uncapped() {
        assert_eq!(clamp_percent(Some(&text("150")), PercentKind::Rate), 150.0);
        assert_eq!(clamp_percent(Some(&text("-3")), PercentKind::Rate), 0.0);
        assert_eq!(clamp_percent(Some(&text("x")), PercentKind::Rate), 0.0);
    }

    #[test]
    fn test_clamp_percent_value() {
        assert_eq!(clamp_percent_value(f64::NAN, PercentKind::Discount), 0.0);
        assert_eq!(clamp_percent_value(250.0, PercentKind::Discount), 100.0);
        assert_eq!(clamp_percent_value(250.0, PercentKind::Rate), 250.0);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(f64::NAN), 0.0);
    }

    #[test]
    fn test_decimal_avoids_float_drift() {
        // 0.1 + 0.2 != 0.3 in f64
        assert_ne!(0.1_f64 + 0.2_f64, 0.3);
        assert_eq!(to_f64(to_decimal(0.1) + to_decimal(0.2)), 0.3);

        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += to_decimal(0.01);
        }
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1085.0), "1085.00");
        assert_eq!(format_money(250.5), "250.50");
        assert_eq!(format_money(f64::NAN), "0.00");
        assert_eq!(format_money(f64::INFINITY), "0.00");
    }

    #[test]
    fn test_out_of_range_decimal_is_zero() {
        assert_eq!(to_decimal(1e30), Decimal::ZERO);
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_raw_number_deserializes_from_number_or_text() {
        let n: RawNumber = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, RawNumber::Number(12.5));
        let t: RawNumber = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(t.parse(), Some(12.5));
    }

    #[test]
    fn test_raw_number_other_json_values_are_malformed() {
        for json in ["true", "{}", "[1, 2]", "{\"value\": 3}"] {
            let raw: RawNumber = serde_json::from_str(json).unwrap();
            assert!(matches!(raw, RawNumber::Other(_)), "input {}", json);
            assert_eq!(raw.parse(), None);
            assert_eq!(to_non_negative_number(Some(&raw)), 0.0);
        }
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(Decimal::new(1004, 3)), Decimal::new(100, 2));
        assert_eq!(round_money(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_money(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
    }
}
