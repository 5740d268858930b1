//! Override-value validation.
//!
//! Before building, the override tree is checked against the schema as an
//! instance document. Violations are aggregated, sorted by instance location
//! for deterministic reporting, and returned as a single error. Skip
//! sentinels are stripped first — they are an engine directive, not data.

use serde_json::{Map, Value};

use crate::config::SKIP;
use crate::error::{Error, Violation, Violations};
use crate::schema::SchemaNode;

/// Validate `overrides` against `schema`; `Err(ValidationFailure)` carries
/// one entry per violated location.
pub fn validate_overrides(schema: &SchemaNode, overrides: &Map<String, Value>) -> Result<(), Error> {
    let schema_doc = schema.to_resolution_document()?;
    let validator = jsonschema::validator_for(&schema_doc)
        .map_err(|err| Error::InvalidInput(format!("schema does not compile: {err}")))?;

    let instance = Value::Object(strip_skips(overrides));
    let mut violations: Vec<Violation> = validator
        .iter_errors(&instance)
        .map(|err| Violation {
            location: err.instance_path.to_string(),
            message: err.to_string(),
        })
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    violations.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.message.cmp(&b.message)));
    Err(Error::ValidationFailure(Violations(violations)))
}

// Remove skip-sentinel entries from the override tree, in maps and lists
// at any depth.
fn strip_skips(overrides: &Map<String, Value>) -> Map<String, Value> {
    overrides
        .iter()
        .filter(|(_, value)| !is_skip(value))
        .map(|(key, value)| (key.clone(), strip_value(value)))
        .collect()
}

fn strip_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_skips(map)),
        Value::Array(items) => Value::Array(
            items.iter().filter(|item| !is_skip(item)).map(strip_value).collect(),
        ),
        other => other.clone(),
    }
}

fn is_skip(value: &Value) -> bool {
    matches!(value, Value::String(text) if text == SKIP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(value).unwrap()
    }

    fn overrides(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn customer() -> SchemaNode {
        schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" }
            }
        }))
    }

    #[test]
    fn conforming_overrides_pass() {
        let result = validate_overrides(&customer(), &overrides(json!({ "name": "John" })));
        assert!(result.is_ok());
    }

    #[test]
    fn type_mismatch_is_reported_with_its_location() {
        let err =
            validate_overrides(&customer(), &overrides(json!({ "name": 12 }))).unwrap_err();
        match err {
            Error::ValidationFailure(Violations(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].location, "/name");
            }
            other => panic!("expected ValidationFailure, got {other}"),
        }
    }

    #[test]
    fn violations_are_sorted_by_location() {
        let err = validate_overrides(
            &customer(),
            &overrides(json!({ "name": 12, "age": "not a number" })),
        )
        .unwrap_err();
        match err {
            Error::ValidationFailure(Violations(violations)) => {
                let locations: Vec<_> =
                    violations.iter().map(|v| v.location.as_str()).collect();
                assert_eq!(locations, vec!["/age", "/name"]);
            }
            other => panic!("expected ValidationFailure, got {other}"),
        }
    }

    #[test]
    fn skip_sentinels_are_not_validated() {
        let result = validate_overrides(&customer(), &overrides(json!({ "age": SKIP })));
        assert!(result.is_ok());
    }

    #[test]
    fn skip_sentinels_inside_list_overrides_are_not_validated() {
        let listy = schema(json!({
            "type": "object",
            "properties": {
                "xs": { "type": "array", "items": { "type": "integer" } }
            }
        }));
        let result = validate_overrides(&listy, &overrides(json!({ "xs": [1, SKIP, 2] })));
        assert!(result.is_ok());
    }

    #[test]
    fn nested_skip_sentinels_are_stripped_too() {
        let nested = schema(json!({
            "type": "object",
            "properties": {
                "db": {
                    "type": "object",
                    "properties": { "password": { "type": "string" } }
                }
            }
        }));
        let result =
            validate_overrides(&nested, &overrides(json!({ "db": { "password": SKIP } })));
        assert!(result.is_ok());
    }
}
