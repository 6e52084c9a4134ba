//! Expansion error types.

use cpumap_core::LookupError;

/// Errors that can occur while expanding a model record.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// A required field is absent.
    #[error("missing required field `{field}`{}", in_model(model))]
    MissingField {
        field: &'static str,
        /// The model being expanded, when its name is already known.
        model: Option<String>,
    },

    /// A field holds a value of the wrong kind.
    #[error("field `{field}` of '{model}' is a {found}, expected a {expected}")]
    UnexpectedShape {
        model: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A version number is not a non-negative integer.
    #[error("invalid version number '{value}' in '{model}'")]
    InvalidVersion { model: String, value: String },

    /// Two version deltas of one model share a number.
    #[error("version {version} of '{model}' is declared more than once")]
    DuplicateVersion { model: String, version: u64 },

    /// Two expanded entries share a name.
    #[error("model '{name}' is produced more than once")]
    DuplicateModel { name: String },

    /// A version property is not a `{ "name", "value" }` pair.
    #[error("property {index} of '{model}' v{version} is not a name/value pair")]
    MalformedProperty {
        model: String,
        version: u64,
        index: usize,
    },

    /// The signature lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

fn in_model(model: &Option<String>) -> String {
    match model {
        Some(name) => format!(" in '{name}'"),
        None => String::new(),
    }
}

/// Result type alias for expansion operations.
pub type Result<T> = std::result::Result<T, ExpandError>;
