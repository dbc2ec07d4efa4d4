use jshape::{build_inspect_tree, parse_json, InspectNode, JsonKind, JsonValue};

fn v(text: &str) -> JsonValue {
    parse_json(text).unwrap()
}

fn child<'a>(node: &'a InspectNode, key: &str) -> &'a InspectNode {
    node.children
        .as_ref()
        .unwrap()
        .iter()
        .find(|c| c.key == key)
        .unwrap_or_else(|| panic!("no child {}", key))
}

#[test]
fn test_object_children_sorted_regardless_of_source_order() {
    let node = build_inspect_tree(&v(r#"{"b": 1, "a": 2}"#));
    assert_eq!(node.kind, JsonKind::Object);
    assert_eq!(node.count, Some(2));
    let keys: Vec<&str> = node
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.key.as_str())
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_array_order_preserved() {
    let node = build_inspect_tree(&v(r#"[1, "x", null]"#));
    let paths: Vec<&str> = node
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.path.as_str())
        .collect();
    assert_eq!(paths, vec!["[0]", "[1]", "[2]"]);
}

#[test]
fn test_kinds_across_value_space() {
    let node = build_inspect_tree(&v(r#"{"s": "x", "n": 1, "b": true, "z": null, "a": [], "o": {}}"#));
    assert_eq!(child(&node, "s").kind, JsonKind::String);
    assert_eq!(child(&node, "n").kind, JsonKind::Number);
    assert_eq!(child(&node, "b").kind, JsonKind::Boolean);
    assert_eq!(child(&node, "z").kind, JsonKind::Null);
    assert_eq!(child(&node, "a").kind, JsonKind::Array);
    assert_eq!(child(&node, "o").kind, JsonKind::Object);
}

#[test]
fn test_counts_only_on_containers() {
    let node = build_inspect_tree(&v(r#"{"items": [1, 2, 3], "name": "x"}"#));
    assert_eq!(child(&node, "items").count, Some(3));
    assert_eq!(child(&node, "name").count, None);
}

#[test]
fn test_leaf_previews() {
    let node = build_inspect_tree(&v(r#"{"n": 2.5, "flag": false, "nothing": null}"#));
    assert_eq!(child(&node, "n").preview, "2.5");
    assert_eq!(child(&node, "flag").preview, "false");
    assert_eq!(child(&node, "nothing").preview, "null");
}

#[test]
fn test_string_preview_truncation() {
    let long = "x".repeat(100);
    let node = build_inspect_tree(&v(&format!(r#"{{"s": "{}"}}"#, long)));
    let preview = &child(&node, "s").preview;
    assert_eq!(preview.len(), 60);
    assert!(preview.ends_with("..."));
}

#[test]
fn test_array_preview_shows_first_five() {
    let node = build_inspect_tree(&v("[1, 2, 3, 4, 5, 6, 7]"));
    assert_eq!(node.preview, "[1, 2, 3, 4, 5, …]");
}

#[test]
fn test_object_preview_keys_in_insertion_order() {
    let node = build_inspect_tree(&v(r#"{"zeta": 1, "alpha": 2}"#));
    // Children sort; the preview keeps source order.
    assert_eq!(node.preview, "{zeta, alpha}");
}

#[test]
fn test_nested_array_paths_and_keys() {
    let node = build_inspect_tree(&v(r#"{"rows": [[1], [2]]}"#));
    let rows = child(&node, "rows");
    let first = &rows.children.as_ref().unwrap()[0];
    assert_eq!(first.path, "rows[0]");
    assert_eq!(first.kind, JsonKind::Array);
    let inner = &first.children.as_ref().unwrap()[0];
    assert_eq!(inner.path, "rows[0][0]");
}

#[test]
fn test_serialized_shape_for_golden_files() {
    let node = build_inspect_tree(&v(r#"{"a": [true]}"#));
    let encoded = serde_json::to_value(&node).unwrap();
    assert_eq!(
        encoded,
        serde_json::json!({
            "key": "",
            "path": "",
            "kind": "object",
            "count": 1,
            "preview": "{a}",
            "children": [{
                "key": "a",
                "path": "a",
                "kind": "array",
                "count": 1,
                "preview": "[true]",
                "children": [{
                    "key": "a[0]",
                    "path": "a[0]",
                    "kind": "boolean",
                    "preview": "true"
                }]
            }]
        })
    );
}
