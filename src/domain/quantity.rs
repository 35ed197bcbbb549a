//! Parsing and formatting of quantities and BRL amounts entered with a comma
//! decimal separator.

use serde::{Deserialize, Serialize};

/// Quantity as it arrives from a form or JSON payload: either a number or a
/// locale-formatted string such as `"12,5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    Number(f64),
    Text(String),
}

impl QuantityValue {
    /// Resolve the value to a finite float, falling back to `default`.
    pub fn to_f64(&self, default: f64) -> f64 {
        match self {
            QuantityValue::Number(value) => finite_or(*value, default),
            QuantityValue::Text(text) => parse_quantity(text, default),
        }
    }
}

impl Default for QuantityValue {
    fn default() -> Self {
        QuantityValue::Number(0.0)
    }
}

impl From<f64> for QuantityValue {
    fn from(value: f64) -> Self {
        QuantityValue::Number(value)
    }
}

impl From<&str> for QuantityValue {
    fn from(value: &str) -> Self {
        QuantityValue::Text(value.to_string())
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() { value } else { default }
}

/// Parse a quantity written with a comma decimal separator.
///
/// Every character other than digits, commas and a leading minus sign is
/// dropped (so `"R$ 1.234,50"` reads as `1234.5`), the first comma becomes the
/// decimal point and the longest numeric prefix is parsed. Anything that does
/// not yield a finite number returns `default`.
pub fn parse_quantity(value: &str, default: f64) -> f64 {
    let trimmed = value.trim();
    let negative = trimmed.starts_with('-');

    let mut normalized = String::with_capacity(trimmed.len() + 1);
    if negative {
        normalized.push('-');
    }

    let mut seen_separator = false;
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            normalized.push(ch);
        } else if ch == ',' {
            if seen_separator {
                break;
            }
            seen_separator = true;
            normalized.push('.');
        }
    }

    if !normalized.chars().any(|ch| ch.is_ascii_digit()) {
        return default;
    }

    match normalized.parse::<f64>() {
        Ok(parsed) => finite_or(parsed, default),
        Err(_) => default,
    }
}

/// Format a quantity with a comma decimal separator.
///
/// Whole numbers are rendered without decimals; fractional values keep up to
/// three decimals with trailing zeros removed.
pub fn formatted_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }

    let rendered = format!("{value:.3}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    rendered.replace('.', ",")
}

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,50`.
pub fn format_currency(value: f64) -> String {
    let value = finite_or(value, 0.0);
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let reais = group_thousands(cents / 100);
    format!("{sign}R$ {reais},{:02}", cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    grouped
}

/// Round to one decimal place, as used by report figures.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
