//! JSHAPE - Structural diff, inspection, and schema graphs for JSON.
//!
//! This library ingests JSON (or YAML/TOML folded into the same value
//! model) and produces derived structures: a flat or hierarchical
//! structural diff of two values, an inspection tree describing one
//! value's types/sizes/previews, or a schema-level container graph that
//! collapses repeated array elements for visual layout.
//!
//! # Example
//!
//! ```
//! use jshape::{compute_diff_tree, parse_json};
//!
//! let old = parse_json(r#"{"x": 1, "y": {"z": 2}}"#)?;
//! let new = parse_json(r#"{"x": 1, "y": {"z": 3}}"#)?;
//!
//! let root = compute_diff_tree(Some(&old), Some(&new));
//! assert!(!root.same);
//! assert_eq!(root.diff_count, 1);
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod canon;
pub mod diff;
pub mod error;
pub mod filter;
pub mod graph;
pub mod inspect;
pub mod output;
pub mod parser;
pub mod tree;

// Re-export commonly used types for convenience
pub use canon::{encode, equal, to_string_literal};
pub use diff::{compute_diff_tree, compute_differences, DiffNode, DiffNodeType, FlatDiff};
pub use error::{JshapeError, OutputError, ParseError};
pub use filter::{filter_diffs, FilterConfig, PathPattern};
pub use graph::{
    build_container_graph, ContainerEdge, ContainerGraph, ContainerKind, ContainerNode,
    GraphOptions, KeyRow, RowType,
};
pub use inspect::{build_inspect_tree, InspectNode};
pub use output::{
    format_diff_tree, format_flat_diff, format_graph, format_inspect_tree, OutputFormat,
    OutputOptions,
};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, FormatHint,
};
pub use tree::{JsonKind, JsonValue};
