//! Extraction error types.

/// Errors that can occur while extracting initializer records.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The line opening the definition array was not found.
    #[error("begin marker not found: expected `{marker}`")]
    BeginMarkerNotFound { marker: String },

    /// The input ended before the line closing the definition array.
    #[error("end marker `}};` not found")]
    EndMarkerNotFound,

    /// The array body does not match the initializer grammar.
    #[error("parse error:\n{detail}")]
    Parse { detail: String },

    /// A map entry key did not lower to a string.
    #[error("malformed map entry: key is a {found}")]
    MalformedEntry { found: &'static str },

    /// A map entry key lowered to nothing.
    #[error("map entry without a key")]
    EmptyKey,

    /// A top-level array element is not a struct initializer.
    #[error("element {index} of the definition array is a {found}, expected a map")]
    UnexpectedShape { index: usize, found: &'static str },

    /// A shorthand macro name could not be turned into a pattern.
    #[error("invalid shorthand pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Whether the input text failed to match the grammar, as opposed to
    /// missing markers or unexpected node shapes.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ExtractError::Parse { .. })
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
