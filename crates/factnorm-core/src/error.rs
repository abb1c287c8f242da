//! Error types for the fact normalizer
//!
//! All fallible operations return `Result<T, Error>`.
//! Every variant falls into one of three kinds (see [`ErrorKind`]):
//! I/O failures, malformed input, and bad configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fact normalizer error types
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read, written, or replaced
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input is not valid UTF-8 JSON
    #[error("input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Top-level JSON value is not an array
    #[error("expected a top-level array, found {found}")]
    NotAnArray { found: &'static str },

    /// Object element lacks the configured fact field
    #[error("element {index}: missing field `{field}`")]
    MissingField { index: usize, field: String },

    /// Element is not an object, but the rule reads a field
    #[error("element {index}: expected an object, found {found}")]
    NotAnObject { index: usize, found: &'static str },

    /// Element (or its fact field) is not a string
    #[error("element {index}: expected a string fact, found {found}")]
    NotAString { index: usize, found: &'static str },

    /// Configuration could not be loaded or is inconsistent
    #[error("invalid config: {0}")]
    Config(String),
}

/// Coarse classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    MalformedInput,
    Config,
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::InvalidJson(_)
            | Error::NotAnArray { .. }
            | Error::MissingField { .. }
            | Error::NotAnObject { .. }
            | Error::NotAString { .. } => ErrorKind::MalformedInput,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        self.kind() == ErrorKind::MalformedInput
    }
}

/// Name of a JSON value's type, for diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Result type alias for fact normalizer operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let io = Error::io(
            "read",
            "missing.json",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(!io.is_malformed_input());

        let missing = Error::MissingField {
            index: 3,
            field: "fact".into(),
        };
        assert!(missing.is_malformed_input());
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_display_carries_context() {
        let err = Error::io(
            "read",
            "uncleaned_cat_facts.json",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("failed to read"));
        assert!(msg.contains("uncleaned_cat_facts.json"));

        let err = Error::NotAString {
            index: 1,
            found: "a number",
        };
        assert_eq!(err.to_string(), "element 1: expected a string fact, found a number");
    }
}
