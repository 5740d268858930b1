//! Render an [`OutputNode`] tree into block-style YAML text.
//!
//! Head comments become `# `-prefixed lines above their key (a lone `#` for
//! escaped blank lines), inline comments trail scalar values, the canonical
//! empty mapping renders as `{}`. Scalars are emitted plain when safe and
//! JSON-quoted otherwise; null is always the literal `null`.

use serde_json::Value;

use crate::node::{MappingEntry, NodeBody, OutputNode};

/// Indent width used when the caller passes 0.
pub const DEFAULT_INDENT: usize = 2;

/// Render `node` as a YAML document. `indent` of 0 means [`DEFAULT_INDENT`].
pub fn render(node: &OutputNode, indent: usize) -> String {
    let indent = if indent == 0 { DEFAULT_INDENT } else { indent };
    let lines = node_lines(node, indent);
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The textual form of a scalar in comment positions: raw strings, `null`
/// for null, JSON flow style for anything structured.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

// Block lines for a standalone node, without outer padding.
fn node_lines(node: &OutputNode, indent: usize) -> Vec<String> {
    match &node.body {
        NodeBody::Empty => Vec::new(),
        NodeBody::Scalar(value) => {
            vec![with_inline_comment(document_scalar(value), &node.line_comment)]
        }
        NodeBody::Mapping(entries) if entries.is_empty() => vec!["{}".to_string()],
        NodeBody::Mapping(entries) => {
            let mut lines = Vec::new();
            for entry in entries {
                push_entry_lines(entry, indent, &mut lines);
            }
            lines
        }
        NodeBody::Sequence(items) if items.is_empty() => vec!["[]".to_string()],
        NodeBody::Sequence(items) => {
            let mut lines = Vec::new();
            for item in items {
                push_item_lines(item, indent, &mut lines);
            }
            lines
        }
    }
}

fn push_entry_lines(entry: &MappingEntry, indent: usize, out: &mut Vec<String>) {
    for line in comment_lines(&entry.head_comment) {
        out.push(line);
    }

    let key = document_scalar(&Value::String(entry.key.clone()));
    match &entry.value.body {
        NodeBody::Empty => {
            out.push(with_inline_comment(format!("{key}:"), &entry.value.line_comment));
        }
        NodeBody::Scalar(value) => {
            let line = format!("{key}: {}", document_scalar(value));
            out.push(with_inline_comment(line, &entry.value.line_comment));
        }
        NodeBody::Mapping(entries) if entries.is_empty() => {
            out.push(format!("{key}: {{}}"));
        }
        NodeBody::Sequence(items) if items.is_empty() => {
            out.push(format!("{key}: []"));
        }
        NodeBody::Mapping(_) | NodeBody::Sequence(_) => {
            out.push(format!("{key}:"));
            let pad = " ".repeat(indent);
            for line in node_lines(&entry.value, indent) {
                out.push(format!("{pad}{line}"));
            }
        }
    }
}

fn push_item_lines(item: &OutputNode, indent: usize, out: &mut Vec<String>) {
    let block = node_lines(item, indent);
    if block.is_empty() {
        out.push("-".to_string());
        return;
    }
    for (position, line) in block.iter().enumerate() {
        if position == 0 {
            out.push(format!("- {line}"));
        } else {
            out.push(format!("  {line}"));
        }
    }
}

// Comment text → rendered lines; the lone `#` continuation marker and blank
// lines both come out as a bare `#`.
fn comment_lines(comment: &str) -> Vec<String> {
    if comment.is_empty() {
        return Vec::new();
    }
    comment
        .trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() || line == "#" {
                "#".to_string()
            } else {
                format!("# {line}")
            }
        })
        .collect()
}

fn with_inline_comment(line: String, comment: &str) -> String {
    if comment.is_empty() {
        line
    } else {
        format!("{line} # {comment}")
    }
}

// Scalar in a document position: strings are quoted when YAML would
// otherwise reinterpret them.
fn document_scalar(value: &Value) -> String {
    match value {
        Value::String(s) if needs_quoting(s) => Value::String(s.clone()).to_string(),
        other => scalar_text(other),
    }
}

fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if matches!(
        s,
        "null" | "Null" | "NULL" | "~" | "true" | "True" | "false" | "False" | "yes" | "Yes"
            | "no" | "No" | "on" | "On" | "off" | "Off"
    ) {
        return true;
    }
    if s.parse::<f64>().is_ok() {
        return true;
    }
    let unsafe_start = s.starts_with(|c: char| {
        matches!(
            c,
            '-' | '?' | ':' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\''
                | '"' | '%' | '@' | '`' | ','
        )
    });
    unsafe_start
        || s.contains(": ")
        || s.ends_with(':')
        || s.contains(" #")
        || s.contains('\n')
        || s.contains('\t')
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{MappingEntry, OutputNode};
    use serde_json::json;

    fn entry(key: &str, head: &str, value: OutputNode) -> MappingEntry {
        MappingEntry { key: key.to_string(), head_comment: head.to_string(), value }
    }

    #[test]
    fn empty_mapping_renders_as_flow_marker() {
        assert_eq!(render(&OutputNode::empty_mapping(), 0), "{}\n");
    }

    #[test]
    fn scalar_with_inline_comment() {
        let node = OutputNode::scalar_with_comment(json!(null), "TODO: Fill this in");
        assert_eq!(render(&node, 0), "null # TODO: Fill this in\n");
    }

    #[test]
    fn mapping_with_head_comment() {
        let node = OutputNode::mapping(vec![entry(
            "name",
            "The name",
            OutputNode::scalar(json!("Robin")),
        )]);
        assert_eq!(render(&node, 0), "# The name\nname: Robin\n");
    }

    #[test]
    fn continuation_markers_stay_bare() {
        let node = OutputNode::mapping(vec![entry(
            "name",
            "first\n#\nsecond",
            OutputNode::scalar(json!(1)),
        )]);
        assert_eq!(render(&node, 0), "# first\n#\n# second\nname: 1\n");
    }

    #[test]
    fn nested_mapping_indents_by_the_requested_width() {
        let inner = OutputNode::mapping(vec![entry("port", "", OutputNode::scalar(json!(5432)))]);
        let node = OutputNode::mapping(vec![entry("db", "", inner)]);
        assert_eq!(render(&node, 4), "db:\n    port: 5432\n");
    }

    #[test]
    fn empty_child_mapping_is_inline() {
        let node = OutputNode::mapping(vec![entry("empty", "", OutputNode::empty_mapping())]);
        assert_eq!(render(&node, 0), "empty: {}\n");
    }

    #[test]
    fn sequence_items_align_continuation_lines() {
        let item = OutputNode::mapping(vec![
            entry("name", "The name", OutputNode::scalar(json!("Coffee"))),
            entry("price", "", OutputNode::scalar(json!(4.5))),
        ]);
        let node = OutputNode::mapping(vec![entry("beverages", "", OutputNode::sequence(vec![item]))]);
        assert_eq!(
            render(&node, 0),
            "beverages:\n  - # The name\n    name: Coffee\n    price: 4.5\n"
        );
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        for text in ["null", "true", "12.5", "", " padded", "a: b", "#lead", "-dash"] {
            let rendered = document_scalar(&json!(text));
            assert!(rendered.starts_with('"'), "{text:?} should be quoted, got {rendered}");
        }
        assert_eq!(document_scalar(&json!("Robin")), "Robin");
        assert_eq!(document_scalar(&json!("with spaces inside")), "with spaces inside");
    }

    #[test]
    fn empty_sequence_renders_as_flow_marker() {
        let node = OutputNode::mapping(vec![entry("items", "", OutputNode::sequence(vec![]))]);
        assert_eq!(render(&node, 0), "items: []\n");
    }
}
