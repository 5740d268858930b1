//! The recursive schema-to-tree engine.
//!
//! For every object node the builder unions the candidate property names
//! (declared properties, override keys, properties declared by inherited
//! pattern schemas), sorts them, and resolves each property's value through a
//! specificity-ordered candidate search: own schema first, then direct
//! pattern matches, then inherited pattern matches. Errors abort the whole
//! build; a partial tree is never returned.

use serde_json::Value;

use crate::comment::format_head_comment;
use crate::config::{Config, Override};
use crate::error::Error;
use crate::node::{MappingEntry, OutputNode};
use crate::pattern::matching_pattern_schemas;
use crate::resolve::resolve_ref;
use crate::schema::{PropType, SchemaNode};

/// Owns the root document handle used for `$ref` resolution and the active
/// reference trail used to detect `$ref` cycles.
pub struct Builder {
    doc: Value,
    ref_trail: Vec<String>,
}

impl Builder {
    /// Capture the raw root document of `root` for later `$ref` lookups.
    /// The full field set is kept: a root that is itself a reference still
    /// carries its sibling definitions blocks.
    pub fn new(root: &SchemaNode) -> Result<Self, Error> {
        Ok(Builder {
            doc: root.to_resolution_document()?,
            ref_trail: Vec::new(),
        })
    }

    /// Produce the example tree for `schema` under the view `cfg`.
    pub fn build(&mut self, schema: &SchemaNode, cfg: &Config) -> Result<OutputNode, Error> {
        if let Some(pointer) = &schema.reference {
            return self.build_reference(pointer, cfg);
        }

        match schema.types.primary() {
            // Nothing to dispatch on: emit an empty node, not an error.
            None => Ok(OutputNode::default()),
            Some(PropType::Object) => self.build_object(schema, cfg),
            Some(PropType::Array) => self.build_array(schema, cfg),
            Some(PropType::Null) => Ok(OutputNode::scalar(Value::Null)),
            Some(_) => Ok(build_scalar(schema, cfg)),
        }
    }

    /// References are transparent: resolve and recurse with the *same*
    /// config. A pointer that is still on the active trail is a cycle.
    fn build_reference(&mut self, pointer: &str, cfg: &Config) -> Result<OutputNode, Error> {
        if self.ref_trail.iter().any(|active| active == pointer) {
            return Err(Error::CyclicReference(pointer.to_string()));
        }

        let resolved = resolve_ref(&self.doc, pointer)?;
        self.ref_trail.push(pointer.to_string());
        let result = self.build(&resolved, cfg);
        self.ref_trail.pop();
        result
    }

    fn build_object(&mut self, schema: &SchemaNode, cfg: &Config) -> Result<OutputNode, Error> {
        // Candidate names: declared properties ∪ override keys ∪ properties
        // declared by inherited pattern schemas. Sorted lexicographically;
        // this is the sole ordering rule for object keys.
        let mut names: Vec<String> = schema.properties.keys().cloned().collect();
        names.extend(cfg.child_overrides.keys().cloned());
        for inherited in &cfg.inherited_patterns {
            names.extend(inherited.properties.keys().cloned());
        }
        names.sort();
        names.dedup();

        let mut entries = Vec::new();
        for name in &names {
            let override_value = cfg.override_for(name);
            if matches!(override_value, Override::Skip) {
                // Skipped regardless of requiredness.
                continue;
            }

            let has_literal_override = matches!(override_value, Override::Scalar(_));
            if cfg.only_required && !has_literal_override && !schema.is_required(name) {
                continue;
            }

            // Own schema, with its $ref chain resolved so its description
            // and default participate in candidate selection.
            let own_raw = schema.properties.get(name);
            let own = match own_raw {
                Some(prop) => Some(self.resolve_for_candidates(prop).map_err(|err| err.at(name))?),
                None => None,
            };

            let direct = matching_pattern_schemas(schema, name).map_err(|err| err.at(name))?;

            // Specificity order: own > direct pattern match > inherited.
            let mut candidates: Vec<&SchemaNode> = Vec::new();
            if let Some(own) = &own {
                candidates.push(own);
            }
            candidates.extend(direct.iter().copied());
            candidates.extend(
                cfg.inherited_patterns
                    .iter()
                    .filter_map(|inherited| inherited.properties.get(name)),
            );

            if candidates.is_empty() {
                // Override with no schema anywhere: silently dropped.
                continue;
            }

            let description = candidates.iter().find_map(|c| c.description_text());
            let examples = candidates
                .iter()
                .find(|c| c.has_examples())
                .map(|c| c.examples.as_slice())
                .unwrap_or(&[]);
            let head_comment = format_head_comment(description, examples, cfg.line_length);

            if let Override::Scalar(value) = override_value {
                // Literal override: no recursion. An explicit null stays a
                // literal null, never an omitted value.
                entries.push(MappingEntry {
                    key: name.clone(),
                    head_comment,
                    value: OutputNode::scalar(value),
                });
                continue;
            }

            // Recurse on the raw own schema when declared (so $ref cycle
            // detection sees the pointer), otherwise on the most specific
            // pattern candidate.
            let target: &SchemaNode = match own_raw {
                Some(prop) => prop,
                None => candidates[0],
            };
            let child_cfg = cfg.for_property(name, &direct).map_err(|err| err.at(name))?;
            let value = self.build(target, &child_cfg).map_err(|err| err.at(name))?;

            entries.push(MappingEntry { key: name.clone(), head_comment, value });
        }

        Ok(OutputNode::mapping(entries))
    }

    /// Follow a chain of `$ref` nodes to the first concrete schema, so a
    /// ref-to-a-ref still contributes its description and default. A pointer
    /// seen twice within the chain is a cycle.
    fn resolve_for_candidates(&self, node: &SchemaNode) -> Result<SchemaNode, Error> {
        let mut seen: Vec<String> = Vec::new();
        let mut current = node.clone();
        while let Some(pointer) = current.reference.clone() {
            if seen.contains(&pointer) {
                return Err(Error::CyclicReference(pointer));
            }
            seen.push(pointer.clone());
            current = resolve_ref(&self.doc, &pointer)?;
        }
        Ok(current)
    }

    fn build_array(&mut self, schema: &SchemaNode, cfg: &Config) -> Result<OutputNode, Error> {
        let Some(items) = &schema.items else {
            return Ok(OutputNode::sequence(Vec::new()));
        };

        if cfg.item_overrides.is_empty() {
            // One representative item; the current view still applies to it.
            let item = self.build(items, cfg).map_err(|err| err.at("items"))?;
            return Ok(OutputNode::sequence(vec![item]));
        }

        let mut out = Vec::with_capacity(cfg.item_overrides.len());
        for index in 0..cfg.item_overrides.len() {
            let child_cfg = cfg.for_index(index);
            let item = self
                .build(items, &child_cfg)
                .map_err(|err| err.at(format!("items[{index}]")))?;
            out.push(item);
        }
        Ok(OutputNode::sequence(out))
    }
}

/// Scalar leaf: value override (gated on nullability), else the first
/// candidate default, else a TODO placeholder.
fn build_scalar(schema: &SchemaNode, cfg: &Config) -> OutputNode {
    let mut candidates: Vec<&SchemaNode> = vec![schema];
    candidates.extend(cfg.inherited_patterns.iter());

    let effective = candidates
        .iter()
        .copied()
        .find(|candidate| candidate.has_default())
        .unwrap_or(schema);

    if let Some(value) = &cfg.value_override {
        // A null override only applies when every candidate is nullable.
        let applies = !value.is_null() || candidates.iter().all(|c| c.nullable());
        if applies {
            return OutputNode::scalar(value.clone());
        }
    }

    if effective.has_default() {
        return OutputNode::scalar(effective.default.clone().unwrap_or(Value::Null));
    }

    if cfg.todo_comment.is_empty() {
        OutputNode::scalar(Value::Null)
    } else {
        OutputNode::scalar_with_comment(Value::Null, cfg.todo_comment.clone())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
