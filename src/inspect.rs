//! Structural inspection of a single JSON value.
//!
//! [`build_inspect_tree`] describes a value's shape — kind, size, and a
//! short preview per node — without comparing it to anything. Object
//! children are sorted by key for stable presentation; array children keep
//! their original order, which is semantically load-bearing.

use crate::tree::{JsonKind, JsonValue};
use serde::Serialize;

/// A node in the inspection tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectNode {
    pub key: String,
    pub path: String,
    pub kind: JsonKind,
    /// Key count for objects, length for arrays, absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<InspectNode>>,
}

/// Builds the inspection tree for a value.
pub fn build_inspect_tree(value: &JsonValue) -> InspectNode {
    inspect_at(value, "")
}

fn inspect_at(value: &JsonValue, path: &str) -> InspectNode {
    match value {
        JsonValue::Object(entries) => {
            let mut sorted: Vec<&(String, JsonValue)> = entries.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(&b.0));

            let children: Vec<InspectNode> = sorted
                .iter()
                .map(|(key, child)| {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", path, key)
                    };
                    inspect_at(child, &child_path)
                })
                .collect();

            InspectNode {
                key: last_segment(path),
                path: path.to_string(),
                kind: JsonKind::Object,
                count: Some(entries.len()),
                preview: value.preview(),
                children: Some(children),
            }
        }
        JsonValue::Array(items) => {
            let children: Vec<InspectNode> = items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let child_path = if path.is_empty() {
                        format!("[{}]", idx)
                    } else {
                        format!("{}[{}]", path, idx)
                    };
                    inspect_at(item, &child_path)
                })
                .collect();

            InspectNode {
                key: last_segment(path),
                path: path.to_string(),
                kind: JsonKind::Array,
                count: Some(items.len()),
                preview: value.preview(),
                children: Some(children),
            }
        }
        _ => InspectNode {
            key: last_segment(path),
            path: path.to_string(),
            kind: value.kind(),
            count: None,
            preview: value.preview(),
            children: None,
        },
    }
}

fn last_segment(path: &str) -> String {
    path.rsplit('.').next().unwrap_or("").to_string()
}
