//! Error taxonomy for the whole crate.
//!
//! Every error aborts the build; there is no partial output. Errors raised
//! deep in the recursion are wrapped with the property/path context they
//! occurred at (see [`Error::at`]), so the top-level message reads like
//! `property 'beverages': property 'price': ...`.

use std::fmt;

use thiserror::Error;

/// One validator violation, keyed by its instance location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON-pointer-ish location inside the override values, e.g. `/name`.
    pub location: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Aggregated, order-stable validator violations (sorted by location).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.0 {
            writeln!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A required input (schema document, override file) is absent or has
    /// the wrong top-level shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A `$ref` points outside the local document (e.g. an absolute URL).
    /// Not a retry case; fetching foreign schemas is unimplemented.
    #[error("reference '{0}' is not supported: only local '#/...' pointers can be resolved")]
    NotSupported(String),

    /// A local `$ref` pointer failed to resolve.
    #[error("invalid reference '{pointer}': {reason}")]
    InvalidReference { pointer: String, reason: String },

    /// A pattern-properties key is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A `$ref` chain came back to a pointer that is still being expanded.
    #[error("cyclic reference through '{0}'")]
    CyclicReference(String),

    /// The schema document itself failed to parse.
    #[error("failed to parse schema{}: {message}", fmt_path(.path))]
    Parse { path: String, message: String },

    /// The override values were rejected by the schema validator.
    #[error("override values do not validate against the schema:\n{0}")]
    ValidationFailure(Violations),

    /// Context wrapper: `source` happened while handling `path`.
    #[error("property '{path}': {source}")]
    At {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap `self` with the property/path context it occurred at.
    pub fn at(self, path: impl Into<String>) -> Self {
        Error::At {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub fn invalid_reference(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidReference {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }
}

fn fmt_path(path: &str) -> String {
    if path.is_empty() || path == "." {
        String::new()
    } else {
        format!(" at '{path}'")
    }
}
