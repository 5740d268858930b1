//! In-memory JSON Schema model.
//!
//! Only the fields the template engine consumes are modeled; everything else
//! is preserved verbatim in [`SchemaNode::extra`] so a document can round-trip
//! through parse → serialize without losing data. The engine itself never
//! reads `extra` — it only matters for re-serialization and for `$ref`
//! lookup, which walks the raw document (definitions blocks can have any
//! shape).

use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// The subset of JSON Schema types the engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PropType::String => "string",
            PropType::Integer => "integer",
            PropType::Number => "number",
            PropType::Boolean => "boolean",
            PropType::Null => "null",
            PropType::Array => "array",
            PropType::Object => "object",
        };
        f.write_str(text)
    }
}

/// The `type` field: either a single type or a list of types.
///
/// Structural dispatch always uses the *first* declared type; a list of
/// exactly two types ending in `null` additionally marks the schema
/// [`nullable`](TypeSet::nullable). Anything beyond that is not a union the
/// engine interprets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeSet(pub Vec<PropType>);

impl TypeSet {
    pub fn single(ty: PropType) -> Self {
        TypeSet(vec![ty])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first declared type, used for structural dispatch.
    pub fn primary(&self) -> Option<PropType> {
        self.0.first().copied()
    }

    /// Exactly two declared types where the second is `null`.
    pub fn nullable(&self) -> bool {
        self.0.len() == 2 && self.0[1] == PropType::Null
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => single.serialize(serializer),
            many => many.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(PropType),
            Many(Vec<PropType>),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(ty) => TypeSet(vec![ty]),
            Repr::Many(types) => TypeSet(types),
        })
    }
}

/// One schema definition, possibly recursive.
///
/// Serialization honors the JSON Reference rule: when [`reference`] is set
/// the node serializes as exactly `{"$ref": "..."}` and every other field is
/// ignored.
///
/// [`reference`]: SchemaNode::reference
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaNode {
    /// Schema identifier; carried but not interpreted.
    #[serde(rename = "$id", default)]
    pub id: Option<String>,

    #[serde(rename = "type", default)]
    pub types: TypeSet,

    /// Pre-filled value in the result, if set.
    #[serde(default)]
    pub default: Option<Value>,

    /// Rendered as a comment above the property in the result.
    #[serde(default)]
    pub description: Option<String>,

    /// Rendered beneath the description in the comment.
    #[serde(default)]
    pub examples: Vec<Value>,

    /// Only used when the type is `object`.
    #[serde(default)]
    pub properties: IndexMap<String, SchemaNode>,

    /// Schemas applied to any property name matching the regex key.
    #[serde(rename = "patternProperties", default)]
    pub pattern_properties: IndexMap<String, SchemaNode>,

    /// Only used when the type is `array`.
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,

    /// Property names this object declares required.
    #[serde(default)]
    pub required: Vec<String>,

    /// Local JSON pointer (`#/...`) to another part of the document.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,

    /// Every field not modeled above, preserved for lossless round-trips.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    /// Parse a schema from raw JSON bytes, with a JSON path in the error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        serde_path_to_error::deserialize(&mut de).map_err(|err| Error::Parse {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        })
    }

    /// Parse a schema from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_path_to_error::deserialize(value).map_err(|err| Error::Parse {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        })
    }

    /// The raw document view of this schema (recognized fields merged over
    /// `extra`), honoring the `$ref`-exclusivity rule.
    pub fn to_raw_document(&self) -> Result<Value, Error> {
        serde_json::to_value(self)
            .map_err(|err| Error::InvalidInput(format!("schema is not serializable: {err}")))
    }

    /// The full raw field set, `$ref` kept alongside its siblings. Pointer
    /// resolution walks this: a definitions block next to a root-level
    /// `$ref` must stay reachable, so the exclusivity rule does not apply.
    pub fn to_resolution_document(&self) -> Result<Value, Error> {
        let mut node = self.clone();
        let reference = node.reference.take();
        let mut doc = node.to_raw_document()?;
        if let (Some(pointer), Some(map)) = (reference, doc.as_object_mut()) {
            map.insert("$ref".to_string(), Value::String(pointer));
        }
        Ok(doc)
    }

    /// True when a concrete (non-null) default value is declared.
    pub fn has_default(&self) -> bool {
        matches!(&self.default, Some(value) if !value.is_null())
    }

    /// The description, if declared and non-empty.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|text| !text.is_empty())
    }

    pub fn has_examples(&self) -> bool {
        !self.examples.is_empty()
    }

    /// Exactly two declared types, the second being `null`.
    pub fn nullable(&self) -> bool {
        self.types.nullable()
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|name| name == property)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A reference node is exactly a reference, nothing else survives.
        if let Some(reference) = &self.reference {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("$ref", reference)?;
            return map.end();
        }

        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("$id", id)?;
        }
        if !self.types.is_empty() {
            map.serialize_entry("type", &self.types)?;
        }
        if let Some(default) = &self.default {
            map.serialize_entry("default", default)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if !self.examples.is_empty() {
            map.serialize_entry("examples", &self.examples)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &self.properties)?;
        }
        if !self.pattern_properties.is_empty() {
            map.serialize_entry("patternProperties", &self.pattern_properties)?;
        }
        if let Some(items) = &self.items {
            map.serialize_entry("items", items)?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
