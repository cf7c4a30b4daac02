//! Coercion of raw form input into typed values
//!
//! A view layer submits every field as text. Each typed field has exactly
//! one function here that parses it or falls back to a documented default,
//! so no call site does its own ad hoc number parsing.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::DEFAULT_MIN_STOCK;
use crate::types::PaymentMethod;

/// Parse a decimal, falling back to `default` when nothing numeric is found.
///
/// Accepts a plain decimal (`"12.5"`), scientific notation (`"1e3"`), or a
/// leading numeric prefix followed by anything else (`"12kg"` parses as 12).
pub fn parse_decimal_or(raw: &str, default: Decimal) -> Decimal {
    parse_decimal(raw).unwrap_or(default)
}

/// Parse a decimal, returning `None` when the input has no numeric prefix
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = Decimal::from_str(trimmed) {
        return Some(value);
    }
    if let Ok(value) = Decimal::from_scientific(trimmed) {
        return Some(value);
    }
    numeric_prefix(trimmed).and_then(|prefix| Decimal::from_str(&prefix).ok())
}

/// Longest `[+-]?digits[.digits]` prefix, normalised so `Decimal` accepts it
fn numeric_prefix(s: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = s.chars().peekable();

    if let Some(&sign) = chars.peek() {
        if sign == '-' || sign == '+' {
            if sign == '-' {
                out.push('-');
            }
            chars.next();
        }
    }

    let mut int_digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        int_digits.push(c);
        chars.next();
    }

    let mut frac_digits = String::new();
    if chars.peek() == Some(&'.') {
        chars.next();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            frac_digits.push(c);
            chars.next();
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }
    if int_digits.is_empty() {
        int_digits.push('0');
    }
    out.push_str(&int_digits);
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(&frac_digits);
    }
    Some(out)
}

/// Parse the low-stock threshold. Missing, non-numeric and zero all mean 10.
pub fn parse_min_stock(raw: &str) -> Decimal {
    match parse_decimal(raw) {
        Some(value) if !value.is_zero() => value,
        _ => DEFAULT_MIN_STOCK,
    }
}

/// Parse a `YYYY-MM-DD` sale date, defaulting to `today`
pub fn parse_sale_date(raw: &str, today: NaiveDate) -> NaiveDate {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").unwrap_or(today)
}

/// Parse a payment method by display name, defaulting to cash
pub fn parse_payment_method(raw: &str) -> PaymentMethod {
    raw.parse().unwrap_or_default()
}

/// Trim free text; blank means absent
pub fn parse_optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a stock back-reference. Anything that is not a UUID is a free-form sale.
pub fn parse_stock_ref(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
