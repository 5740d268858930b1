//! The override store.
//!
//! A [`Config`] is the per-node view of caller options during recursion: the
//! override values scoped to the current node, the pattern-property schemas
//! inherited from ancestors, and the formatting knobs. Configs are immutable
//! once built; every descent into a property or array index allocates a new
//! one via [`Config::for_property`] / [`Config::for_index`].

use serde_json::{Map, Value};

use crate::error::Error;
use crate::pattern::matching_pattern_schemas;
use crate::schema::SchemaNode;

/// Distinguished override value meaning "omit this key from the output".
///
/// It lives inside the ordinary override-value space (a string, so it can be
/// written in a JSON override file) but is never emitted as a literal.
/// `null` is *not* a skip: it is a valid literal override.
pub const SKIP: &str = "<<skip>>";

/// Inline comment attached to properties with no determinable value.
pub const DEFAULT_TODO_COMMENT: &str = "TODO: Fill this in";

/// Default column width for word-wrapping description comments.
pub const DEFAULT_LINE_LENGTH: usize = 80;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// An override value, classified exactly once at the store boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// No override supplied for this key.
    Absent,
    /// The [`SKIP`] sentinel: omit the key entirely.
    Skip,
    /// A literal value, including an explicit `null`.
    Scalar(Value),
    /// Nested overrides for an object sub-schema, never a literal.
    Nested(Map<String, Value>),
    /// Per-index overrides for an array sub-schema, never a literal.
    List(Vec<Value>),
}

impl Override {
    pub fn classify(value: &Value) -> Self {
        match value {
            Value::String(text) if text == SKIP => Override::Skip,
            Value::Object(map) => Override::Nested(map.clone()),
            Value::Array(items) => Override::List(items.clone()),
            other => Override::Scalar(other.clone()),
        }
    }
}

/// Per-recursion-level view of the caller's options.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Literal override for the current node. `Some(Value::Null)` is an
    /// explicit null, distinct from no override at all.
    pub value_override: Option<Value>,

    /// Overrides consulted when descending into object properties. The
    /// structure mimics the schema's nesting.
    pub child_overrides: Map<String, Value>,

    /// Overrides consulted when descending into array indices.
    pub item_overrides: Vec<Value>,

    /// Pattern-property schemas inherited from ancestor matches,
    /// highest-priority first.
    pub inherited_patterns: Vec<SchemaNode>,

    /// Inline comment for properties with no determinable value; empty
    /// disables the comment.
    pub todo_comment: String,

    /// Emit only required properties (plus anything explicitly overridden).
    pub only_required: bool,

    /// Column width for comment word-wrap; 0 disables wrapping.
    pub line_length: usize,

    /// Renderer indent width; 0 means the renderer default.
    pub indent: usize,

    /// Skip validating the override values against the schema.
    pub skip_validation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            value_override: None,
            child_overrides: Map::new(),
            item_overrides: Vec::new(),
            inherited_patterns: Vec::new(),
            todo_comment: DEFAULT_TODO_COMMENT.to_string(),
            only_required: false,
            line_length: DEFAULT_LINE_LENGTH,
            indent: 0,
            skip_validation: false,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root override values; nest maps to reach nested schema objects, lists
    /// to reach array items.
    pub fn with_overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.child_overrides = overrides;
        self
    }

    /// Replace the TODO comment; an empty string removes it altogether.
    pub fn with_todo_comment(mut self, comment: impl Into<String>) -> Self {
        self.todo_comment = comment.into();
        self
    }

    pub fn with_only_required(mut self, only_required: bool) -> Self {
        self.only_required = only_required;
        self
    }

    /// Comment wrap width; 0 disables wrapping.
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    /// Classify the override supplied for `property_name`, if any.
    ///
    /// Nested maps and lists are descent scope, not literal overrides; the
    /// builder treats them as "no literal value here".
    pub fn override_for(&self, property_name: &str) -> Override {
        match self.child_overrides.get(property_name) {
            None => Override::Absent,
            Some(value) => Override::classify(value),
        }
    }

    /// The child config for descending into `property_name`.
    ///
    /// `pattern_matches` are the schemas matched against the name by the
    /// *current* schema's pattern-properties; they are folded into the
    /// child's inherited set, followed by the matches contributed by every
    /// already-inherited pattern schema — nested pattern-property blocks
    /// apply at arbitrary depth this way.
    pub fn for_property(
        &self,
        property_name: &str,
        pattern_matches: &[&SchemaNode],
    ) -> Result<Config, Error> {
        let mut child = self.bare_child();

        match self.override_for(property_name) {
            Override::Absent | Override::Skip => {}
            Override::Scalar(value) => child.value_override = Some(value),
            Override::Nested(map) => child.child_overrides = map,
            Override::List(items) => child.item_overrides = items,
        }

        let mut inherited: Vec<SchemaNode> =
            pattern_matches.iter().map(|schema| (*schema).clone()).collect();
        for ancestor in &self.inherited_patterns {
            for matched in matching_pattern_schemas(ancestor, property_name)? {
                inherited.push(matched.clone());
            }
        }
        child.inherited_patterns = inherited;

        Ok(child)
    }

    /// The child config for descending into array index `index`.
    ///
    /// Out-of-bounds indices yield a config with no override at all.
    /// Inherited pattern schemas do not flow into array items.
    pub fn for_index(&self, index: usize) -> Config {
        let mut child = self.bare_child();

        match self.item_overrides.get(index) {
            None => {}
            Some(value) => match Override::classify(value) {
                Override::Absent | Override::Skip => {}
                Override::Scalar(value) => child.value_override = Some(value),
                Override::Nested(map) => child.child_overrides = map,
                Override::List(items) => child.item_overrides = items,
            },
        }

        child
    }

    // Child with the simple knobs copied and all scoping cleared.
    fn bare_child(&self) -> Config {
        Config {
            value_override: None,
            child_overrides: Map::new(),
            item_overrides: Vec::new(),
            inherited_patterns: Vec::new(),
            todo_comment: self.todo_comment.clone(),
            only_required: self.only_required,
            line_length: self.line_length,
            indent: self.indent,
            skip_validation: self.skip_validation,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
