//! Local `$ref` resolution.
//!
//! Pointers are resolved against the *raw* document (recognized fields merged
//! with `extra`), not the typed model — definitions can hide anywhere, under
//! `$defs`, `definitions` or any other key. Only `#`-prefixed local pointers
//! are supported; fetching foreign schemas is out of scope.

use serde_json::Value;

use crate::error::Error;
use crate::schema::SchemaNode;

/// Resolve `pointer` (e.g. `#/$defs/Thing`) inside `doc` and re-parse the
/// located value into a fresh [`SchemaNode`].
///
/// The result is never identity-shared with the root document; nested
/// unrecognized fields materialize into the new node's `extra`.
pub fn resolve_ref(doc: &Value, pointer: &str) -> Result<SchemaNode, Error> {
    let raw = lookup(doc, pointer)?;
    SchemaNode::from_value(raw.clone()).map_err(|err| {
        Error::invalid_reference(pointer, format!("resolved value is not a schema: {err}"))
    })
}

/// Walk `pointer` segment by segment through `doc`.
///
/// A lone `#` returns the document itself. Every intermediate segment must
/// resolve to an object; a missing segment or a non-object intermediate is an
/// [`Error::InvalidReference`].
pub fn lookup<'doc>(doc: &'doc Value, pointer: &str) -> Result<&'doc Value, Error> {
    if !pointer.starts_with('#') {
        return Err(Error::NotSupported(pointer.to_string()));
    }

    let mut segments = pointer.split('/');
    if segments.next() != Some("#") {
        return Err(Error::invalid_reference(pointer, "pointer must start with '#/'"));
    }

    let mut current = doc;
    for segment in segments {
        let object = current.as_object().ok_or_else(|| {
            Error::invalid_reference(pointer, format!("segment before '{segment}' is not an object"))
        })?;
        current = object.get(segment).ok_or_else(|| {
            Error::invalid_reference(pointer, format!("segment '{segment}' not found"))
        })?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "type": "object",
            "$defs": {
                "name": { "type": "string", "default": "v" },
                "nested": {
                    "inner": { "type": "integer" }
                },
                "scalar-block": 42
            }
        })
    }

    #[test]
    fn lone_hash_returns_the_document() {
        let doc = document();
        let found = lookup(&doc, "#").unwrap();
        assert_eq!(found, &doc);
    }

    #[test]
    fn resolves_nested_segments() {
        let doc = document();
        let found = lookup(&doc, "#/$defs/nested/inner").unwrap();
        assert_eq!(found, &json!({ "type": "integer" }));
    }

    #[test]
    fn foreign_url_is_not_supported() {
        let doc = document();
        let err = lookup(&doc, "https://example.com/schema.json#/x").unwrap_err();
        assert!(matches!(err, Error::NotSupported(_)));
    }

    #[test]
    fn missing_segment_is_an_invalid_reference() {
        let doc = document();
        let err = lookup(&doc, "#/$defs/absent").unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));
    }

    #[test]
    fn non_object_intermediate_is_an_invalid_reference() {
        let doc = document();
        let err = lookup(&doc, "#/$defs/scalar-block/deeper").unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));
    }

    #[test]
    fn resolve_ref_reparses_into_a_fresh_schema() {
        let doc = document();
        let schema = resolve_ref(&doc, "#/$defs/name").unwrap();
        assert_eq!(schema.default, Some(json!("v")));
    }

    #[test]
    fn resolve_ref_rejects_unparseable_values() {
        let doc = document();
        let err = resolve_ref(&doc, "#/$defs/scalar-block").unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));
    }
}
