//! Pattern-properties matching.
//!
//! Patterns are consulted in lexicographic order of the pattern text, which
//! is the sole ordering rule here and defines priority when several patterns
//! match the same property name. Matching is unanchored containment, as JSON
//! Schema specifies for `patternProperties`.

use regex::Regex;

use crate::error::Error;
use crate::schema::SchemaNode;

/// All pattern-property schemas of `schema` whose pattern matches
/// `property_name`, in lexicographic pattern order.
///
/// Every declared pattern is compiled, matching or not: an invalid pattern
/// anywhere in the block is a hard error, never silently skipped.
pub fn matching_pattern_schemas<'schema>(
    schema: &'schema SchemaNode,
    property_name: &str,
) -> Result<Vec<&'schema SchemaNode>, Error> {
    if schema.pattern_properties.is_empty() {
        return Ok(Vec::new());
    }

    let mut patterns: Vec<&String> = schema.pattern_properties.keys().collect();
    patterns.sort();

    let mut matches = Vec::new();
    for pattern in patterns {
        let regex = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.clone(),
            source: Box::new(source),
        })?;
        if regex.is_match(property_name) {
            matches.push(&schema.pattern_properties[pattern]);
        }
    }

    Ok(matches)
}
