//! Parsing structured input into the `JsonValue` model.
//!
//! JSON is the primary input format; YAML and TOML documents are accepted
//! as well and funnel into the same value model. Format detection follows
//! file extension, falling back to attempting JSON then YAML when the
//! extension is unknown.
//!
//! One contract worth calling out: an empty or all-whitespace JSON input
//! parses as `{}` rather than failing, so diff and inspect operate on an
//! empty object when an input side is blank.

use crate::error::ParseError;
use crate::tree::JsonValue;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Explicit input format selection for `parse_content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
}

/// Parses a file into a `JsonValue`.
///
/// The format is detected by file extension (.json, .yaml, .yml, .toml).
/// Unknown or missing extensions fall back to attempting JSON first, then
/// YAML.
///
/// # Errors
///
/// Returns `ParseError::FileNotFound` when the path does not exist,
/// `ParseError::ReadError` when the file cannot be read, the per-format
/// error when the content is invalid, and `ParseError::UnknownFormat`
/// when no fallback succeeds.
pub fn parse_file(path: &Path) -> Result<JsonValue, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("json") => parse_json(&content)
            .map_err(|e| ParseError::json_error(path.to_string_lossy().to_string(), e)),
        Some("yaml") | Some("yml") => parse_yaml(&content)
            .map_err(|e| ParseError::yaml_error(path.to_string_lossy().to_string(), e)),
        Some("toml") => parse_toml(&content)
            .map_err(|e| ParseError::toml_error(path.to_string_lossy().to_string(), e)),
        _ => parse_json(&content)
            .map_err(|_| ())
            .or_else(|_| parse_yaml(&content).map_err(|_| ()))
            .map_err(|_| ParseError::unknown_format(path.to_string_lossy().to_string())),
    }
}

/// Parses content with an explicit format, labeling errors with `origin`.
pub fn parse_content(
    content: &str,
    hint: FormatHint,
    origin: &str,
) -> Result<JsonValue, ParseError> {
    match hint {
        FormatHint::Json => {
            parse_json(content).map_err(|e| ParseError::json_error(origin, e))
        }
        FormatHint::Yaml => {
            parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e))
        }
        FormatHint::Toml => {
            parse_toml(content).map_err(|e| ParseError::toml_error(origin, e))
        }
    }
}

/// Reads standard input to the end and parses it, trying JSON then YAML.
pub fn parse_stdin() -> Result<JsonValue, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;

    parse_json(&content)
        .map_err(|_| ())
        .or_else(|_| parse_yaml(&content).map_err(|_| ()))
        .map_err(|_| ParseError::unknown_format("<stdin>"))
}

/// Parses a JSON string into a `JsonValue`.
///
/// An empty or all-whitespace string parses as `{}`.
pub fn parse_json(content: &str) -> Result<JsonValue, serde_json::Error> {
    let effective = if content.trim().is_empty() {
        "{}"
    } else {
        content
    };
    let value: serde_json::Value = serde_json::from_str(effective)?;
    Ok(json_to_value(value))
}

/// Parses a YAML string into a `JsonValue`.
pub fn parse_yaml(content: &str) -> Result<JsonValue, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_value(value))
}

/// Parses a TOML document into a `JsonValue`.
pub fn parse_toml(content: &str) -> Result<JsonValue, toml::de::Error> {
    let value: toml::Value = toml::from_str(content)?;
    Ok(toml_to_value(value))
}

/// Converts a `serde_json::Value` to our representation.
///
/// serde_json is built with its `preserve_order` feature, so object entries
/// arrive here in source order and stay that way.
fn json_to_value(value: serde_json::Value) -> JsonValue {
    match value {
        serde_json::Value::Null => JsonValue::Null,
        serde_json::Value::Bool(b) => JsonValue::Bool(b),
        serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => JsonValue::String(s),
        serde_json::Value::Array(arr) => {
            JsonValue::Array(arr.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(obj) => JsonValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

/// Converts a `serde_yaml::Value`. Non-string mapping keys become strings;
/// tagged values are evaluated to their inner value.
fn yaml_to_value(value: serde_yaml::Value) -> JsonValue {
    match value {
        serde_yaml::Value::Null => JsonValue::Null,
        serde_yaml::Value::Bool(b) => JsonValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                JsonValue::Number(f)
            } else if let Some(i) = n.as_i64() {
                JsonValue::Number(i as f64)
            } else if let Some(u) = n.as_u64() {
                JsonValue::Number(u as f64)
            } else {
                JsonValue::Number(0.0)
            }
        }
        serde_yaml::Value::String(s) => JsonValue::String(s),
        serde_yaml::Value::Sequence(seq) => {
            JsonValue::Array(seq.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_value(v))
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

/// Converts a `toml::Value`. Datetimes become their string form.
fn toml_to_value(value: toml::Value) -> JsonValue {
    match value {
        toml::Value::String(s) => JsonValue::String(s),
        toml::Value::Integer(i) => JsonValue::Number(i as f64),
        toml::Value::Float(f) => JsonValue::Number(f),
        toml::Value::Boolean(b) => JsonValue::Bool(b),
        toml::Value::Datetime(dt) => JsonValue::String(dt.to_string()),
        toml::Value::Array(arr) => {
            JsonValue::Array(arr.into_iter().map(toml_to_value).collect())
        }
        toml::Value::Table(table) => JsonValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ),
    }
}
