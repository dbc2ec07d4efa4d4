//! Structural diff engines.
//!
//! Two engines share the same canonical-equality semantics:
//!
//! - [`compute_differences`] flattens both inputs to dotted leaf paths and
//!   emits one [`FlatDiff`] per path in the union. Only objects are
//!   flattened; an array is a single leaf compared as a whole.
//! - [`compute_diff_tree`] mirrors the object nesting of the inputs as a
//!   [`DiffNode`] tree with aggregate difference counts. Arrays stay
//!   atomic here too: an array-typed node never expands element-wise.
//!
//! # Examples
//!
//! ```
//! use jshape::{compute_differences, parse_json};
//!
//! let old = parse_json(r#"{"age": 30}"#).unwrap();
//! let new = parse_json(r#"{"age": 31}"#).unwrap();
//!
//! let diffs = compute_differences(&old, &new);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].key, "age");
//! assert!(!diffs[0].same);
//! ```

use crate::canon;
use crate::tree::JsonValue;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Classification of a node in the hierarchical diff.
///
/// An Array on either side wins over an Object on the other side; only
/// when neither side is an Array and at least one is an Object does the
/// node classify as Object. Everything else is Value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffNodeType {
    Object,
    Array,
    Value,
}

/// One per-path comparison in the flat diff.
///
/// `same` is true only when the path is present on both sides and the two
/// values are canonically equal. Absent sides carry no value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatDiff {
    pub key: String,
    pub same: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<JsonValue>,
    pub left_present: bool,
    pub right_present: bool,
}

/// A node in the hierarchical diff tree.
///
/// Object nodes carry `children` and no values; Array and Value nodes
/// carry the values of whichever sides are present and no children.
/// `diff_count` is the number of non-same Array/Value leaves in the
/// subtree — each counts as one unit regardless of how large the
/// underlying value is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffNode {
    pub key: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: DiffNodeType,
    pub same: bool,
    pub left_present: bool,
    pub right_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DiffNode>>,
    pub diff_count: usize,
}

impl DiffNode {
    /// True when no leaf in the subtree differs and both sides are present.
    pub fn is_clean(&self) -> bool {
        self.same && self.diff_count == 0
    }
}

/// Computes the flat per-path diff of two values.
///
/// Flattening recurses through objects only, joining nested keys with `.`;
/// arrays and primitives become single leaf entries at their own path. A
/// non-object root flattens to the single path `""`, and an empty object
/// contributes no paths at all.
///
/// Ordering contract: entries with `same == false` come first, then
/// `same == true`; within each group paths sort lexicographically.
pub fn compute_differences(a: &JsonValue, b: &JsonValue) -> Vec<FlatDiff> {
    let mut left_leaves = BTreeMap::new();
    flatten(String::new(), a, &mut left_leaves);
    let mut right_leaves = BTreeMap::new();
    flatten(String::new(), b, &mut right_leaves);

    let paths: BTreeSet<&String> = left_leaves.keys().chain(right_leaves.keys()).collect();

    let mut diffs: Vec<FlatDiff> = paths
        .into_iter()
        .map(|path| {
            let left = left_leaves.get(path).copied();
            let right = right_leaves.get(path).copied();
            let same = match (left, right) {
                (Some(l), Some(r)) => canon::equal(l, r),
                _ => false,
            };
            FlatDiff {
                key: path.clone(),
                same,
                left: left.cloned(),
                right: right.cloned(),
                left_present: left.is_some(),
                right_present: right.is_some(),
            }
        })
        .collect();

    diffs.sort_by(|x, y| x.same.cmp(&y.same).then_with(|| x.key.cmp(&y.key)));
    diffs
}

/// Computes the hierarchical diff of two optionally-present values.
///
/// The root invocation uses the empty path; the root node's `key` is the
/// empty string, which callers render as a root marker.
pub fn compute_diff_tree(a: Option<&JsonValue>, b: Option<&JsonValue>) -> DiffNode {
    diff_tree_at(a, b, "")
}

/// Maps a value to dotted-leaf-path entries. Only objects recurse.
fn flatten<'a>(prefix: String, node: &'a JsonValue, out: &mut BTreeMap<String, &'a JsonValue>) {
    match node {
        JsonValue::Object(entries) => {
            for (key, value) in entries {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(child, value, out);
            }
        }
        _ => {
            out.insert(prefix, node);
        }
    }
}

fn diff_tree_at(a: Option<&JsonValue>, b: Option<&JsonValue>, path: &str) -> DiffNode {
    let left_present = a.is_some();
    let right_present = b.is_some();

    let either_array = matches!(a, Some(JsonValue::Array(_)))
        || matches!(b, Some(JsonValue::Array(_)));
    let either_object = matches!(a, Some(JsonValue::Object(_)))
        || matches!(b, Some(JsonValue::Object(_)));

    if !either_array && either_object {
        let mut keys: BTreeSet<&str> = BTreeSet::new();
        if let Some(JsonValue::Object(entries)) = a {
            keys.extend(entries.iter().map(|(k, _)| k.as_str()));
        }
        if let Some(JsonValue::Object(entries)) = b {
            keys.extend(entries.iter().map(|(k, _)| k.as_str()));
        }

        let children: Vec<DiffNode> = keys
            .into_iter()
            .map(|key| {
                let child_path = if path.is_empty() {
                    key.to_string()
                } else {
                    format!("{}.{}", path, key)
                };
                diff_tree_at(
                    a.and_then(|v| v.get(key)),
                    b.and_then(|v| v.get(key)),
                    &child_path,
                )
            })
            .collect();

        let same = left_present && right_present && children.iter().all(|c| c.same);
        let diff_count = children.iter().map(|c| c.diff_count).sum();

        return DiffNode {
            key: last_segment(path),
            path: path.to_string(),
            node_type: DiffNodeType::Object,
            same,
            left_present,
            right_present,
            left: None,
            right: None,
            children: Some(children),
            diff_count,
        };
    }

    // Arrays and primitives are atomic leaves: compared whole, never
    // expanded element-wise.
    let same = match (a, b) {
        (Some(l), Some(r)) => canon::equal(l, r),
        _ => false,
    };

    DiffNode {
        key: last_segment(path),
        path: path.to_string(),
        node_type: if either_array {
            DiffNodeType::Array
        } else {
            DiffNodeType::Value
        },
        same,
        left_present,
        right_present,
        left: a.cloned(),
        right: b.cloned(),
        children: None,
        diff_count: if same { 0 } else { 1 },
    }
}

fn last_segment(path: &str) -> String {
    path.rsplit('.').next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_json;

    fn v(text: &str) -> JsonValue {
        parse_json(text).unwrap()
    }

    #[test]
    fn test_flat_diff_reflexive() {
        let value = v(r#"{"a": 1, "b": {"c": [1, 2]}, "d": null}"#);
        let diffs = compute_differences(&value, &value);
        assert!(diffs.iter().all(|d| d.same));
    }

    #[test]
    fn test_flat_diff_missing_key() {
        let diffs = compute_differences(&v("{}"), &v(r#"{"a": 1}"#));
        assert_eq!(diffs.len(), 1);
        let d = &diffs[0];
        assert_eq!(d.key, "a");
        assert!(!d.same);
        assert!(!d.left_present);
        assert!(d.right_present);
        assert!(d.left.is_none());
        assert_eq!(d.right, Some(JsonValue::Number(1.0)));
    }

    #[test]
    fn test_flat_diff_empty_objects() {
        let diffs = compute_differences(&v("{}"), &v("{}"));
        assert!(diffs.is_empty());
    }

    #[test]
    fn test_flat_diff_nested_paths() {
        let diffs = compute_differences(
            &v(r#"{"user": {"name": "Alice", "age": 30}}"#),
            &v(r#"{"user": {"name": "Alice", "age": 31}}"#),
        );
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].key, "user.age");
        assert!(!diffs[0].same);
        assert_eq!(diffs[1].key, "user.name");
        assert!(diffs[1].same);
    }

    #[test]
    fn test_flat_diff_array_is_a_single_leaf() {
        let diffs = compute_differences(&v(r#"{"a": [1, 2]}"#), &v(r#"{"a": [1, 3]}"#));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, "a");
        assert!(!diffs[0].same);
    }

    #[test]
    fn test_flat_diff_non_object_root_uses_empty_path() {
        let diffs = compute_differences(&v("5"), &v("5"));
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].key, "");
        assert!(diffs[0].same);
    }

    #[test]
    fn test_flat_diff_sort_contract() {
        let diffs = compute_differences(
            &v(r#"{"z": 1, "a": 1, "m": 2}"#),
            &v(r#"{"z": 1, "a": 2, "m": 2}"#),
        );
        let first_same = diffs.iter().position(|d| d.same).unwrap();
        assert!(diffs[..first_same].iter().all(|d| !d.same));
        assert!(diffs[first_same..].iter().all(|d| d.same));
        for window in diffs[first_same..].windows(2) {
            assert!(window[0].key <= window[1].key);
        }
    }

    #[test]
    fn test_flat_diff_symmetry_of_presence() {
        let a = v(r#"{"only_left": 1, "shared": 2}"#);
        let b = v(r#"{"only_right": 3, "shared": 2}"#);
        let forward = compute_differences(&a, &b);
        let backward = compute_differences(&b, &a);
        assert_eq!(forward.len(), backward.len());

        for d in &forward {
            let mirror = backward.iter().find(|m| m.key == d.key).unwrap();
            assert_eq!(d.same, mirror.same);
            assert_eq!(d.left_present, mirror.right_present);
            assert_eq!(d.right_present, mirror.left_present);
            assert_eq!(d.left, mirror.right);
            assert_eq!(d.right, mirror.left);
        }
    }

    #[test]
    fn test_tree_diff_reflexive() {
        let value = v(r#"{"x": 1, "y": {"z": [1, 2, 3]}}"#);
        let root = compute_diff_tree(Some(&value), Some(&value));
        assert!(root.same);
        assert_eq!(root.diff_count, 0);
    }

    #[test]
    fn test_tree_diff_nested_scenario() {
        let root = compute_diff_tree(
            Some(&v(r#"{"x": 1, "y": {"z": 2}}"#)),
            Some(&v(r#"{"x": 1, "y": {"z": 3}}"#)),
        );
        assert_eq!(root.node_type, DiffNodeType::Object);
        assert!(!root.same);
        assert_eq!(root.diff_count, 1);
        assert_eq!(root.key, "");

        let children = root.children.as_ref().unwrap();
        let y = children.iter().find(|c| c.key == "y").unwrap();
        assert_eq!(y.node_type, DiffNodeType::Object);
        assert!(!y.same);
        assert_eq!(y.diff_count, 1);

        let z = &y.children.as_ref().unwrap()[0];
        assert_eq!(z.path, "y.z");
        assert_eq!(z.node_type, DiffNodeType::Value);
        assert!(!z.same);
    }

    #[test]
    fn test_tree_diff_array_atomicity() {
        let root = compute_diff_tree(Some(&v(r#"{"a": [1, 2]}"#)), Some(&v(r#"{"a": [1, 3]}"#)));
        let children = root.children.as_ref().unwrap();
        assert_eq!(children.len(), 1);
        let a = &children[0];
        assert_eq!(a.path, "a");
        assert_eq!(a.node_type, DiffNodeType::Array);
        assert!(!a.same);
        assert!(a.children.is_none());
        assert_eq!(a.diff_count, 1);
    }

    #[test]
    fn test_tree_diff_array_wins_over_object() {
        let root = compute_diff_tree(Some(&v(r#"[1]"#)), Some(&v(r#"{"a": 1}"#)));
        assert_eq!(root.node_type, DiffNodeType::Array);
        assert!(!root.same);
        assert!(root.children.is_none());
    }

    #[test]
    fn test_tree_diff_absent_side() {
        let root = compute_diff_tree(Some(&v(r#"{"a": 1}"#)), None);
        assert_eq!(root.node_type, DiffNodeType::Object);
        assert!(!root.same);
        assert!(root.left_present);
        assert!(!root.right_present);
        // The missing side shows up on the leaf, not as an extra count on
        // the object itself.
        assert_eq!(root.diff_count, 1);
        let a = &root.children.as_ref().unwrap()[0];
        assert!(!a.right_present);
        assert!(!a.same);
    }

    #[test]
    fn test_tree_diff_empty_objects_are_same() {
        let root = compute_diff_tree(Some(&v("{}")), Some(&v("{}")));
        assert!(root.same);
        assert_eq!(root.diff_count, 0);
        assert_eq!(root.children.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn test_tree_diff_object_children_sorted() {
        let root = compute_diff_tree(
            Some(&v(r#"{"b": 1, "a": 2}"#)),
            Some(&v(r#"{"c": 3, "a": 2}"#)),
        );
        let keys: Vec<&str> = root
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tree_diff_key_order_sensitive_leaf_equality() {
        // Objects inside arrays are compared by canonical encoding, which
        // reproduces insertion order.
        let root = compute_diff_tree(
            Some(&v(r#"{"a": [{"x": 1, "y": 2}]}"#)),
            Some(&v(r#"{"a": [{"y": 2, "x": 1}]}"#)),
        );
        assert!(!root.same);
        assert_eq!(root.diff_count, 1);
    }
}
