//! Writer for the markup subset understood by [`parse`](super::parse).

use std::fmt::Write;

use crate::document::{Mapping, Value};

use super::lenient::INDENT_WIDTH;
use super::scalar::infer_scalar;

/// Write a document back as two-space indented `key: value` lines.
///
/// Strings that would be read back as another type are single-quoted.
/// Empty mappings and null are written as `{}`. Keys are written as-is,
/// so keys containing `:` or starting with `#` do not survive a re-parse;
/// the parser never produces such keys.
pub fn emit(doc: &Mapping) -> String {
    let mut out = String::new();
    emit_mapping(&mut out, doc, 0);
    out
}

fn emit_mapping(out: &mut String, mapping: &Mapping, depth: usize) {
    let indent = " ".repeat(depth * INDENT_WIDTH);

    for (key, value) in mapping.iter() {
        match value {
            Value::Mapping(child) if !child.is_empty() => {
                let _ = writeln!(out, "{indent}{key}:");
                emit_mapping(out, child, depth + 1);
            }
            Value::Mapping(_) | Value::Null => {
                let _ = writeln!(out, "{indent}{key}: {{}}");
            }
            Value::String(s) => {
                let _ = writeln!(out, "{indent}{key}: {}", emit_string(s));
            }
            Value::Bool(_) | Value::Number(_) => {
                let _ = writeln!(out, "{indent}{key}: {value}");
            }
        }
    }
}

/// Quote a string when its plain form would not read back unchanged.
fn emit_string(s: &str) -> String {
    let plain_reads_back = s == s.trim() && infer_scalar(s).as_str() == Some(s);
    if plain_reads_back {
        s.to_string()
    } else {
        format!("'{}'", s)
    }
}
