//! JSON value model shared by every engine in the crate.

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

/// The kind of a JSON value, as classified by the inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Boolean => "boolean",
            JsonKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A value in a parsed JSON document.
///
/// Objects preserve key insertion order: the canonical encoding and the
/// container graph both observe source order. Keys are unique.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// True for Null, Bool, Number, and String.
    pub fn is_primitive(&self) -> bool {
        !self.is_array() && !self.is_object()
    }

    /// Object field lookup by key. Returns None for non-objects.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Null => JsonKind::Null,
            JsonValue::Bool(_) => JsonKind::Boolean,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::String(_) => JsonKind::String,
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Object(_) => JsonKind::Object,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Returns a short human-readable preview of the value.
    ///
    /// Strings are truncated to 60 characters, containers show at most
    /// their first five elements or key names with a trailing ellipsis
    /// marker when more exist.
    pub fn preview(&self) -> String {
        match self {
            JsonValue::String(s) => {
                if s.chars().count() > 60 {
                    let head: String = s.chars().take(57).collect();
                    format!("{}...", head)
                } else {
                    s.clone()
                }
            }
            JsonValue::Number(n) => crate::canon::format_number(*n),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Null => "null".to_string(),
            JsonValue::Array(items) => {
                let shown: Vec<String> = items.iter().take(5).map(crate::canon::encode).collect();
                if items.len() > 5 {
                    format!("[{}, …]", shown.join(", "))
                } else {
                    format!("[{}]", shown.join(", "))
                }
            }
            JsonValue::Object(entries) => {
                let shown: Vec<&str> = entries.iter().take(5).map(|(k, _)| k.as_str()).collect();
                if entries.len() > 5 {
                    format!("{{{}, …}}", shown.join(", "))
                } else {
                    format!("{{{}}}", shown.join(", "))
                }
            }
        }
    }

    /// Returns an approximate in-memory size in bytes for this value.
    pub fn size(&self) -> usize {
        match self {
            JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => {
                std::mem::size_of::<JsonValue>()
            }
            JsonValue::String(s) => std::mem::size_of::<JsonValue>() + s.len(),
            JsonValue::Object(entries) => {
                let base = std::mem::size_of::<JsonValue>();
                let fields: usize = entries.iter().map(|(k, v)| k.len() + v.size()).sum();
                base + fields
            }
            JsonValue::Array(items) => {
                let base = std::mem::size_of::<JsonValue>();
                let elements: usize = items.iter().map(|v| v.size()).sum();
                base + elements
            }
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => serializer.serialize_f64(*n),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
