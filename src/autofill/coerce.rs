//! The one place where typed record values become form strings.
//!
//! Form controls only hold strings (or a checked flag), so numbers and
//! booleans lose their type here. The conversions follow what a browser does
//! when a JSON value is assigned to `input.value` or tested for truthiness.

use serde_json::Value;

/// String written into a text-like control for a fetched value.
///
/// `null` clears the control, numbers use their shortest decimal form
/// (`5.0` becomes `"5"`), arrays join their items with commas.
pub fn control_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                match n.as_f64() {
                    Some(f) => format_float(f),
                    None => n.to_string(),
                }
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(control_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        // covers -0
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// Truthiness of a fetched value, used for checkboxes and identifiers.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Identifier string for a `_pk` value; falsy values are no identifier.
pub fn target_id(value: &Value) -> Option<String> {
    if truthy(value) {
        Some(control_value(value))
    } else {
        None
    }
}

/// Leading decimal integer of a control value, `parseInt`-style.
///
/// Leading whitespace and one sign are accepted and parsing stops at the
/// first non-digit, so `"12abc"` is 12 and `"3.9"` is 3. Returns `None` when
/// no digit is found or the number does not fit an `i64`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let sign_len = match trimmed.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };

    let digits_len = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len() - sign_len);
    if digits_len == 0 {
        return None;
    }

    // sign and digits together, so i64::MIN still fits
    trimmed[..sign_len + digits_len].parse().ok()
}
