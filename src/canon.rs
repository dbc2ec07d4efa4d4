//! Canonical encoding and the equality predicate built on it.
//!
//! Two values are equal iff their canonical encodings are byte-identical.
//! The encoding is a compact JSON serialization that reproduces object key
//! insertion order; it does NOT sort keys. Objects with the same entries in
//! a different source order therefore encode differently and compare
//! unequal when treated as atomic leaves. Object-typed diff nodes recurse
//! key-by-key instead of calling this predicate, so only Array/Value leaf
//! comparisons observe the ordering.

use crate::tree::JsonValue;

/// Serialize a number the way ECMAScript does for the common cases:
/// finite integral values print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    const SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53
    if n.is_finite() && n.fract() == 0.0 && n.abs() < SAFE_INTEGER {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Encode a value to its canonical compact form.
pub fn encode(value: &JsonValue) -> String {
    let mut output = String::new();
    encode_value(value, &mut output);
    output
}

/// Canonical-form equality: identical encodings, nothing more.
pub fn equal(a: &JsonValue, b: &JsonValue) -> bool {
    encode(a) == encode(b)
}

/// Render a value as a double-quoted source-code string literal holding its
/// compact encoding, usable verbatim in another program's source.
pub fn to_string_literal(value: &JsonValue) -> String {
    let compact = encode(value);
    let escaped = compact.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn encode_value(value: &JsonValue, output: &mut String) {
    match value {
        JsonValue::Null => output.push_str("null"),
        JsonValue::Bool(true) => output.push_str("true"),
        JsonValue::Bool(false) => output.push_str("false"),
        JsonValue::Number(n) => output.push_str(&format_number(*n)),
        JsonValue::String(s) => encode_string(s, output),
        JsonValue::Array(items) => {
            output.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                encode_value(item, output);
            }
            output.push(']');
        }
        JsonValue::Object(entries) => {
            output.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    output.push(',');
                }
                encode_string(key, output);
                output.push(':');
                encode_value(value, output);
            }
            output.push('}');
        }
    }
}

fn encode_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
