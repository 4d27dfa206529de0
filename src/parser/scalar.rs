//! Scalar type inference for the lenient parser.

use crate::document::{Mapping, Value};

/// Infer the type of a raw value taken from the right of a `key:`.
///
/// Priority order:
/// 1. empty or `{}` -> empty mapping (filled by deeper lines, if any)
/// 2. `'quoted'` -> the literal content between the quotes
/// 3. `true` / `false` -> boolean
/// 4. a finite number -> number
/// 5. anything else -> the string as written
pub fn infer_scalar(raw: &str) -> Value {
    if raw.is_empty() || raw == "{}" {
        return Value::Mapping(Mapping::new());
    }

    if let Some(inner) = unquote(raw) {
        return Value::String(inner.to_string());
    }

    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(n) = parse_number(raw) {
        return Value::Number(n);
    }

    Value::String(raw.to_string())
}

/// Strip a surrounding pair of single quotes.
pub fn unquote(raw: &str) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Parse a numeric literal.
///
/// Infinities and NaN spellings are left as strings.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}
