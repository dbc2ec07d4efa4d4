//! Output formatting for the four result structures.
//!
//! Each structure renders in three formats: colored terminal output,
//! plain text (no ANSI codes, suitable for piping), and JSON. The JSON
//! format is a direct serde encoding of the result structure and is the
//! stable surface for golden-file testing; the text formats are for
//! humans and make no stability promise.

use crate::canon;
use crate::diff::{DiffNode, DiffNodeType, FlatDiff};
use crate::error::OutputError;
use crate::graph::{ContainerGraph, ContainerKind};
use crate::inspect::InspectNode;
use crate::tree::JsonValue;
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON encoding of the result structure
    Json,
    /// Plain text, no colors
    Plain,
}

/// Options for controlling text output.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Hide entries that are the same on both sides
    pub compact: bool,
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            compact: true,
            max_value_length: 80,
        }
    }
}

/// Formats a flat diff according to the format and options.
pub fn format_flat_diff(
    diffs: &[FlatDiff],
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(diffs),
        OutputFormat::Terminal => Ok(format_flat_text(diffs, options, true)),
        OutputFormat::Plain => Ok(format_flat_text(diffs, options, false)),
    }
}

/// Formats a hierarchical diff tree.
pub fn format_diff_tree(
    root: &DiffNode,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(root),
        OutputFormat::Terminal => Ok(format_tree_text(root, options, true)),
        OutputFormat::Plain => Ok(format_tree_text(root, options, false)),
    }
}

/// Formats an inspection tree.
pub fn format_inspect_tree(
    root: &InspectNode,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(root),
        OutputFormat::Terminal => Ok(format_inspect_text(root, options, true)),
        OutputFormat::Plain => Ok(format_inspect_text(root, options, false)),
    }
}

/// Formats a container graph.
pub fn format_graph(
    graph: &ContainerGraph,
    format: &OutputFormat,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json => to_json(graph),
        OutputFormat::Terminal => Ok(format_graph_text(graph, true)),
        OutputFormat::Plain => Ok(format_graph_text(graph, false)),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn format_flat_text(diffs: &[FlatDiff], options: &OutputOptions, color: bool) -> String {
    let mut output = String::new();
    let shown: Vec<&FlatDiff> = diffs
        .iter()
        .filter(|d| !options.compact || !d.same)
        .collect();

    if shown.is_empty() {
        let message = "No differences detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    for diff in shown {
        output.push_str(&format_flat_entry(diff, options, color));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&flat_summary(diffs));
    output
}

fn format_flat_entry(diff: &FlatDiff, options: &OutputOptions, color: bool) -> String {
    let key = if diff.key.is_empty() {
        "(root)"
    } else {
        diff.key.as_str()
    };

    if !diff.left_present {
        let value = render_side(diff.right.as_ref(), options.max_value_length);
        if color {
            format!("{} {}: {}", "+".bright_green(), key.green(), value.green())
        } else {
            format!("+ {}: {}", key, value)
        }
    } else if !diff.right_present {
        let value = render_side(diff.left.as_ref(), options.max_value_length);
        if color {
            format!("{} {}: {}", "-".bright_red(), key.red(), value.red())
        } else {
            format!("- {}: {}", key, value)
        }
    } else if !diff.same {
        let left = render_side(diff.left.as_ref(), options.max_value_length);
        let right = render_side(diff.right.as_ref(), options.max_value_length);
        if color {
            format!(
                "{} {}: {} {} {}",
                "•".bright_yellow(),
                key.yellow(),
                left.yellow(),
                "→".bright_yellow(),
                right.yellow()
            )
        } else {
            format!("• {}: {} → {}", key, left, right)
        }
    } else {
        let value = render_side(diff.left.as_ref(), options.max_value_length);
        if color {
            format!("  {}: {}", key.dimmed(), value.dimmed())
        } else {
            format!("  {}: {}", key, value)
        }
    }
}

/// Summary line in `added / removed / changed / same` vocabulary.
fn flat_summary(diffs: &[FlatDiff]) -> String {
    let added = diffs.iter().filter(|d| !d.left_present).count();
    let removed = diffs.iter().filter(|d| !d.right_present).count();
    let changed = diffs
        .iter()
        .filter(|d| d.left_present && d.right_present && !d.same)
        .count();
    let same = diffs.iter().filter(|d| d.same).count();

    if added + removed + changed == 0 {
        return "Summary: No differences".to_string();
    }

    let mut parts = Vec::new();
    if added > 0 {
        parts.push(format!("{} added", added));
    }
    if removed > 0 {
        parts.push(format!("{} removed", removed));
    }
    if changed > 0 {
        parts.push(format!("{} changed", changed));
    }
    if same > 0 {
        parts.push(format!("{} same", same));
    }
    format!("Summary: {}", parts.join(", "))
}

fn format_tree_text(root: &DiffNode, options: &OutputOptions, color: bool) -> String {
    let mut output = String::new();
    render_diff_node(root, 0, options, color, &mut output);

    if root.diff_count == 0 && root.same {
        let message = "No differences detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }
    output
}

fn render_diff_node(
    node: &DiffNode,
    depth: usize,
    options: &OutputOptions,
    color: bool,
    output: &mut String,
) {
    let indent = "  ".repeat(depth);
    let name = if node.key.is_empty() {
        "(root)"
    } else {
        node.key.as_str()
    };

    match node.node_type {
        DiffNodeType::Object => {
            let line = if node.diff_count > 0 {
                format!("{}{} ({} differing)", indent, name, node.diff_count)
            } else {
                format!("{}{}", indent, name)
            };
            if color && node.diff_count == 0 {
                output.push_str(&line.dimmed().to_string());
            } else {
                output.push_str(&line);
            }
            output.push('\n');
            for child in node.children.iter().flatten() {
                if options.compact && child.same {
                    continue;
                }
                render_diff_node(child, depth + 1, options, color, output);
            }
        }
        DiffNodeType::Array | DiffNodeType::Value => {
            let entry = FlatDiff {
                key: name.to_string(),
                same: node.same,
                left: node.left.clone(),
                right: node.right.clone(),
                left_present: node.left_present,
                right_present: node.right_present,
            };
            output.push_str(&indent);
            output.push_str(&format_flat_entry(&entry, options, color));
            output.push('\n');
        }
    }
}

fn format_inspect_text(root: &InspectNode, options: &OutputOptions, color: bool) -> String {
    let mut output = String::new();
    render_inspect_node(root, 0, options, color, &mut output);
    output
}

fn render_inspect_node(
    node: &InspectNode,
    depth: usize,
    options: &OutputOptions,
    color: bool,
    output: &mut String,
) {
    let indent = "  ".repeat(depth);
    let name = if node.key.is_empty() {
        "(root)"
    } else {
        node.key.as_str()
    };

    let descriptor = match node.count {
        Some(count) => format!("{} ({})", node.kind, count),
        None => node.kind.to_string(),
    };

    let line = match &node.children {
        Some(_) => {
            if color {
                format!("{}{} [{}]", indent, name.bold(), descriptor.cyan())
            } else {
                format!("{}{} [{}]", indent, name, descriptor)
            }
        }
        None => {
            let preview = clip(&node.preview, options.max_value_length);
            if color {
                format!(
                    "{}{} [{}] {}",
                    indent,
                    name.bold(),
                    descriptor.cyan(),
                    preview.dimmed()
                )
            } else {
                format!("{}{} [{}] {}", indent, name, descriptor, preview)
            }
        }
    };
    output.push_str(&line);
    output.push('\n');

    for child in node.children.iter().flatten() {
        render_inspect_node(child, depth + 1, options, color, output);
    }
}

fn format_graph_text(graph: &ContainerGraph, color: bool) -> String {
    let mut output = String::new();

    output.push_str(&heading("Nodes:", color));
    output.push('\n');
    for node in &graph.nodes {
        let kind = match node.kind {
            ContainerKind::Object => "object",
            ContainerKind::Array => "array",
        };
        let mut annotations = Vec::new();
        if let Some(meta) = &node.meta {
            if let Some(count) = meta.count {
                annotations.push(format!("count {}", count));
            }
            if let Some(note) = &meta.note {
                annotations.push(note.clone());
            }
        }
        let suffix = if annotations.is_empty() {
            String::new()
        } else {
            format!(" ({})", annotations.join(", "))
        };

        let line = if color {
            format!("  {} [{}]{}", node.id.bold(), kind.cyan(), suffix.dimmed())
        } else {
            format!("  {} [{}]{}", node.id, kind, suffix)
        };
        output.push_str(&line);
        output.push('\n');

        for row in &node.rows {
            output.push_str(&format!("    {}: {}\n", row.key, row.row_type.name()));
        }
    }

    output.push_str(&heading("Edges:", color));
    output.push('\n');
    for edge in &graph.edges {
        let label = edge
            .label
            .as_ref()
            .map(|l| format!(" ({})", l))
            .unwrap_or_default();
        output.push_str(&format!("  {} -> {}{}\n", edge.source, edge.target, label));
    }

    output
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Renders one side of a comparison; absent sides show as `(missing)`.
fn render_side(value: Option<&JsonValue>, max_length: usize) -> String {
    match value {
        Some(v) => clip(&canon::encode(v), max_length),
        None => "(missing)".to_string(),
    }
}

fn clip(text: &str, max_length: usize) -> String {
    if text.chars().count() > max_length {
        let head: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
