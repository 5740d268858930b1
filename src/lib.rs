//! yamlseed turns a JSON Schema into an annotated example YAML document:
//! defaults become pre-filled values, `description` and `examples` become
//! comments, and everything without a value gets a TODO placeholder — a
//! fill-in-the-blanks configuration template.
//!
//! ```no_run
//! use yamlseed::{Config, SchemaNode, schema_to_yaml};
//!
//! let schema = SchemaNode::from_slice(br#"{
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string", "default": "Robin", "description": "The name" }
//!     }
//! }"#)?;
//! let yaml = schema_to_yaml(&schema, &Config::new())?;
//! # Ok::<(), yamlseed::Error>(())
//! ```

pub mod build;
pub mod cli;
pub mod comment;
pub mod config;
pub mod error;
pub mod node;
pub mod pattern;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use build::Builder;
pub use config::{Config, DEFAULT_LINE_LENGTH, DEFAULT_TODO_COMMENT, Override, SKIP};
pub use error::{Error, Violation, Violations};
pub use node::{MappingEntry, NodeBody, OutputNode};
pub use schema::{PropType, SchemaNode, TypeSet};

/// Result type for yamlseed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Build the annotated example tree for `schema`.
///
/// Unless [`Config::skip_validation`] is set, the override values are first
/// validated against the schema; any violation aborts before building.
pub fn schema_to_node(schema: &SchemaNode, cfg: &Config) -> Result<OutputNode> {
    if !cfg.skip_validation {
        validate::validate_overrides(schema, &cfg.child_overrides)?;
    }
    Builder::new(schema)?.build(schema, cfg)
}

/// [`schema_to_node`] plus rendering to YAML text, honoring
/// [`Config::indent`].
pub fn schema_to_yaml(schema: &SchemaNode, cfg: &Config) -> Result<String> {
    let node = schema_to_node(schema, cfg)?;
    Ok(render::render(&node, cfg.indent))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
