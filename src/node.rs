//! The produced example tree. Strongly typed; only scalar payloads carry a
//! `serde_json::Value`, the renderer decides their textual form.

use serde_json::Value;

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputNode {
    /// Comment rendered inline after a scalar value, empty for none.
    pub line_comment: String,
    pub body: NodeBody,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum NodeBody {
    /// Nothing to emit: produced for schemas with no declared type.
    #[default]
    Empty,
    /// A scalar value; `Value::Null` renders as the literal `null`.
    Scalar(Value),
    /// An ordered mapping. An empty list of entries is the canonical
    /// empty-object marker and renders as `{}`.
    Mapping(Vec<MappingEntry>),
    /// An ordered sequence of items.
    Sequence(Vec<OutputNode>),
}

/// One key/value pair of a mapping, with the comment block above the key.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: String,
    /// Comment rendered above the key, empty for none.
    pub head_comment: String,
    pub value: OutputNode,
}

impl OutputNode {
    pub fn scalar(value: Value) -> Self {
        OutputNode { line_comment: String::new(), body: NodeBody::Scalar(value) }
    }

    pub fn scalar_with_comment(value: Value, line_comment: impl Into<String>) -> Self {
        OutputNode { line_comment: line_comment.into(), body: NodeBody::Scalar(value) }
    }

    pub fn mapping(entries: Vec<MappingEntry>) -> Self {
        OutputNode { line_comment: String::new(), body: NodeBody::Mapping(entries) }
    }

    pub fn sequence(items: Vec<OutputNode>) -> Self {
        OutputNode { line_comment: String::new(), body: NodeBody::Sequence(items) }
    }

    /// The canonical marker for an object with nothing in it.
    pub fn empty_mapping() -> Self {
        Self::mapping(Vec::new())
    }

    pub fn is_empty_mapping(&self) -> bool {
        matches!(&self.body, NodeBody::Mapping(entries) if entries.is_empty())
    }
}
