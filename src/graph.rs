//! Schema-level container graph synthesis.
//!
//! [`build_container_graph`] summarizes a value's container shape as nodes
//! and edges suitable for visual layout. Homogeneous array elements
//! collapse into one representative "item" node instead of one node per
//! element, so the graph stays bounded even for very large or highly
//! repetitive documents. Schema inference samples only the first
//! `page_size` elements of each array — elements beyond the window are
//! not reflected in the inferred shape.
//!
//! Node ids derive purely from structural path ("(root)" at the root), so
//! identical input and options reproduce identical output.
//!
//! # Examples
//!
//! ```
//! use jshape::{build_container_graph, parse_json, GraphOptions};
//!
//! let value = parse_json(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
//! let graph = build_container_graph(&value, &GraphOptions::default());
//!
//! // One array node plus one collapsed item node, not one per element.
//! assert_eq!(graph.nodes.len(), 2);
//! ```

use crate::tree::JsonValue;
use serde::Serialize;
use std::collections::HashSet;

/// Id of the root container node.
pub const ROOT_ID: &str = "(root)";

const MAX_ARRAY_CHILD_SAMPLES: usize = 3;

/// Container classification for graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Object,
    Array,
}

/// Primitive type label for an inline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowType {
    String,
    Number,
    Boolean,
    Null,
    Unknown,
}

impl RowType {
    fn of(value: &JsonValue) -> RowType {
        match value {
            JsonValue::Null => RowType::Null,
            JsonValue::Bool(_) => RowType::Boolean,
            JsonValue::Number(_) => RowType::Number,
            JsonValue::String(_) => RowType::String,
            _ => RowType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RowType::String => "string",
            RowType::Number => "number",
            RowType::Boolean => "boolean",
            RowType::Null => "null",
            RowType::Unknown => "unknown",
        }
    }
}

/// A primitive field shown inline on a container node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRow {
    pub key: String,
    #[serde(rename = "type")]
    pub row_type: RowType,
}

/// Optional annotations on a container node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One container in the graph. `id` is the structural path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerNode {
    pub id: String,
    pub label: String,
    pub kind: ContainerKind,
    pub depth: usize,
    pub rows: Vec<KeyRow>,
    pub child_containers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ContainerMeta>,
}

/// A directed edge between two container nodes.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// The complete graph: an immutable snapshot per invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerGraph {
    pub nodes: Vec<ContainerNode>,
    pub edges: Vec<ContainerEdge>,
}

/// Options for graph construction.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Maximum number of array elements sampled for schema inference.
    pub page_size: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

/// Builds the container graph for a value.
pub fn build_container_graph(value: &JsonValue, options: &GraphOptions) -> ContainerGraph {
    let mut builder = GraphBuilder {
        nodes: Vec::new(),
        edges: Vec::new(),
        page_size: options.page_size,
    };

    match value {
        JsonValue::Array(items) => builder.visit_array(items, ROOT_ID, 0, ROOT_ID),
        JsonValue::Object(entries) => builder.visit_object(entries, ROOT_ID, 0, ROOT_ID),
        primitive => builder.nodes.push(ContainerNode {
            id: ROOT_ID.to_string(),
            label: ROOT_ID.to_string(),
            kind: ContainerKind::Object,
            depth: 0,
            rows: vec![KeyRow {
                key: "(value)".to_string(),
                row_type: RowType::of(primitive),
            }],
            child_containers: Vec::new(),
            meta: None,
        }),
    }

    ContainerGraph {
        nodes: builder.nodes,
        edges: builder.edges,
    }
}

struct GraphBuilder {
    nodes: Vec<ContainerNode>,
    edges: Vec<ContainerEdge>,
    page_size: usize,
}

fn make_id(parent: &str, child: &str) -> String {
    if parent == ROOT_ID {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

fn make_edge(source: &str, target: &str, label: String) -> ContainerEdge {
    ContainerEdge {
        id: format!("{}->{}", source, target),
        source: source.to_string(),
        target: target.to_string(),
        label: Some(label),
    }
}

impl GraphBuilder {
    fn visit_object(
        &mut self,
        entries: &[(String, JsonValue)],
        path: &str,
        depth: usize,
        label: &str,
    ) {
        let mut node = ContainerNode {
            id: path.to_string(),
            label: label.to_string(),
            kind: ContainerKind::Object,
            depth,
            rows: Vec::new(),
            child_containers: Vec::new(),
            meta: Some(ContainerMeta {
                count: Some(entries.len()),
                note: None,
            }),
        };

        for (key, value) in entries {
            match value {
                JsonValue::Array(items) => {
                    let child_path = make_id(path, key);
                    self.visit_array(items, &child_path, depth + 1, &format!("{}[]", key));
                    node.child_containers.push(child_path.clone());
                    self.edges.push(make_edge(path, &child_path, key.clone()));
                }
                JsonValue::Object(child_entries) => {
                    let child_path = make_id(path, key);
                    self.visit_object(child_entries, &child_path, depth + 1, key);
                    node.child_containers.push(child_path.clone());
                    self.edges.push(make_edge(path, &child_path, key.clone()));
                }
                primitive => node.rows.push(KeyRow {
                    key: key.clone(),
                    row_type: RowType::of(primitive),
                }),
            }
        }

        self.nodes.push(node);
    }

    fn visit_array(&mut self, items: &[JsonValue], path: &str, depth: usize, label: &str) {
        // The array node lands before any of its children; it is updated
        // in place as child containers are discovered.
        let node_idx = self.nodes.len();
        self.nodes.push(ContainerNode {
            id: path.to_string(),
            label: label.to_string(),
            kind: ContainerKind::Array,
            depth,
            rows: Vec::new(),
            child_containers: Vec::new(),
            meta: Some(ContainerMeta {
                count: Some(items.len()),
                note: None,
            }),
        });

        let sample = &items[..items.len().min(self.page_size)];
        let first_non_null = sample.iter().find(|v| !v.is_null());

        match first_non_null {
            None => {
                let node = &mut self.nodes[node_idx];
                if let Some(meta) = node.meta.as_mut() {
                    meta.note = Some("empty array".to_string());
                }
                node.rows.push(KeyRow {
                    key: "item".to_string(),
                    row_type: RowType::Unknown,
                });
            }
            Some(JsonValue::Array(_)) => {
                if let Some(meta) = self.nodes[node_idx].meta.as_mut() {
                    meta.note = Some("array of arrays".to_string());
                }

                let sampled_indices: Vec<usize> = sample
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_array())
                    .map(|(i, _)| i)
                    .take(MAX_ARRAY_CHILD_SAMPLES)
                    .collect();

                for idx in sampled_indices {
                    let child_path = format!("{}[{}]", path, idx);
                    if let JsonValue::Array(child_items) = &items[idx] {
                        self.visit_array(
                            child_items,
                            &child_path,
                            depth + 1,
                            &format!("[{}]", idx),
                        );
                    }
                    self.nodes[node_idx].child_containers.push(child_path.clone());
                    self.edges
                        .push(make_edge(path, &child_path, format!("[{}]", idx)));
                }
            }
            Some(JsonValue::Object(_)) => {
                if let Some(meta) = self.nodes[node_idx].meta.as_mut() {
                    meta.note = Some("array of objects".to_string());
                }
                self.visit_item_schema(sample, path, depth);
            }
            Some(first) => {
                let row_type = RowType::of(first);
                let node = &mut self.nodes[node_idx];
                if let Some(meta) = node.meta.as_mut() {
                    meta.note = Some(format!("array of {}", row_type.name()));
                }
                node.rows.push(KeyRow {
                    key: "item".to_string(),
                    row_type,
                });
            }
        }
    }

    /// Synthesizes the single "item" node representing the merged shape of
    /// sampled object elements.
    ///
    /// Primitive field types merge first-occurrence-wins: a later element
    /// with a different type for the same key neither overrides nor flags
    /// a conflict. Nested fields deduplicate by child path the same way.
    fn visit_item_schema(&mut self, sample: &[JsonValue], path: &str, depth: usize) {
        let item_id = format!("{}.__item__", path);
        let mut item_node = ContainerNode {
            id: item_id.clone(),
            label: "item".to_string(),
            kind: ContainerKind::Object,
            depth: depth + 1,
            rows: Vec::new(),
            child_containers: Vec::new(),
            meta: None,
        };

        let mut key_types: Vec<(String, RowType)> = Vec::new();
        let mut nested: Vec<(&String, &JsonValue)> = Vec::new();

        for element in sample {
            if let JsonValue::Object(entries) = element {
                for (key, value) in entries {
                    if value.is_primitive() {
                        if !key_types.iter().any(|(seen, _)| seen == key) {
                            key_types.push((key.clone(), RowType::of(value)));
                        }
                    } else {
                        nested.push((key, value));
                    }
                }
            }
        }

        key_types.sort_by(|a, b| a.0.cmp(&b.0));
        item_node.rows = key_types
            .into_iter()
            .map(|(key, row_type)| KeyRow { key, row_type })
            .collect();

        let mut seen = HashSet::new();
        for (key, value) in nested {
            let child_path = format!("{}.{}", item_id, key);
            if !seen.insert(child_path.clone()) {
                continue;
            }

            match value {
                JsonValue::Array(child_items) => {
                    self.visit_array(child_items, &child_path, depth + 2, &format!("{}[]", key));
                }
                JsonValue::Object(child_entries) => {
                    self.visit_object(child_entries, &child_path, depth + 2, key);
                }
                _ => continue,
            }
            item_node.child_containers.push(child_path.clone());
            self.edges.push(make_edge(&item_id, &child_path, key.clone()));
        }

        self.nodes.push(item_node);
        self.edges.push(make_edge(path, &item_id, "item".to_string()));
    }
}
