//! Type coercion
//!
//! Every function treats null and blank input as "no value" (`Ok(None)`)
//! and reports anything it cannot convert as a `RuleApplicationError`
//! carrying the offending literal.

use crate::error::{Result, RuleApplicationError};
use regex::Regex;
use rowmap_core::ast::ConversionType;
use rowmap_core::Value;
use std::sync::LazyLock;

/// `YYYY-MM-DD`, `YYYY/MM/DD` and separator-less forms; month and day may
/// have one digit
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[/-]?(\d{1,2})[/-]?(\d{1,2})$").expect("valid regex")
});

static COMPACT_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// Convert to an integer
pub fn to_integer(value: &Value) -> Result<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i)),
        other if other.is_blank() => Ok(None),
        other => {
            let text = other.to_text();
            text.trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| RuleApplicationError::IntConversion(text))
        }
    }
}

/// Convert to a float
pub fn to_float(value: &Value) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(*i as f64)),
        Value::Float(f) => Ok(Some(*f)),
        other if other.is_blank() => Ok(None),
        other => {
            let text = other.to_text();
            text.trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| RuleApplicationError::FloatConversion(text))
        }
    }
}

/// Normalise a date to `YYYYMMDD`
pub fn to_date_yyyymmdd(value: &Value) -> Result<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    let text = value.to_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Some(caps) = DATE_REGEX.captures(trimmed) {
        return Ok(Some(format!(
            "{}{:0>2}{:0>2}",
            &caps[1], &caps[2], &caps[3]
        )));
    }
    if COMPACT_DATE_REGEX.is_match(trimmed) {
        return Ok(Some(trimmed.to_string()));
    }

    Err(RuleApplicationError::DateConversion(text))
}

/// Convert a truthy/falsy literal to a boolean
pub fn to_boolean(value: &Value) -> Result<Option<bool>> {
    if let Value::Bool(b) = value {
        return Ok(Some(*b));
    }
    if value.is_null() {
        return Ok(None);
    }

    let text = value.to_text();
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(Some(true)),
        "false" | "0" | "no" | "n" => Ok(Some(false)),
        "" => Ok(None),
        _ => Err(RuleApplicationError::BoolConversion(text)),
    }
}

/// Round to `digits` decimal places (negative digits round to tens,
/// hundreds, ...)
pub fn round_number(value: &Value, digits: i32) -> Result<Option<f64>> {
    let number = to_float(value)
        .map_err(|_| RuleApplicationError::RoundConversion(value.to_text()))?;
    Ok(number.map(|n| round_to(n, digits)))
}

/// Round a float to `digits` decimal places; exact ties go to the even
/// neighbour
pub fn round_to(n: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (n * factor).round_ties_even() / factor
}

/// Apply a named conversion; unknown names are an error even for null input
pub fn convert(conversion: &ConversionType, value: &Value) -> Result<Value> {
    match conversion {
        ConversionType::ToInteger => to_integer(value).map(Value::from),
        ConversionType::ToDateYyyymmdd => to_date_yyyymmdd(value).map(Value::from),
        ConversionType::ToBoolean => to_boolean(value).map(Value::from),
        ConversionType::Unknown(name) => Err(RuleApplicationError::UnknownConversion(name.clone())),
    }
}
