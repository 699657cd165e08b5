//! Structured error types for configuration loading.
//!
//! Every failure carries enough context (field, entry index, cause) to be
//! rendered as a single diagnostic line. Nothing is printed here; callers
//! decide how to surface the error.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The document could not be read from disk.
    IoError,
    /// The document is not well-formed structured text.
    DecodeError,
    /// A field is present but holds the wrong kind of value.
    TypeMismatch,
    /// A field holds a value that violates a configuration invariant.
    ValidationError,
}

/// Location of a field inside the configuration document.
///
/// Renders as `max_time` for global fields, `benchmarks` for the list itself,
/// `benchmarks[3]` for a whole entry and `benchmarks[3].filename` for an
/// entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    index: Option<usize>,
    name: Option<&'static str>,
}

impl FieldPath {
    /// A field of the global section.
    pub fn global(name: &'static str) -> Self {
        Self {
            index: None,
            name: Some(name),
        }
    }

    /// A whole benchmark entry.
    pub fn entry(index: usize) -> Self {
        Self {
            index: Some(index),
            name: None,
        }
    }

    /// A field of one benchmark entry.
    pub fn entry_field(index: usize, name: &'static str) -> Self {
        Self {
            index: Some(index),
            name: Some(name),
        }
    }

    /// Index of the benchmark entry, if the path points into one.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Field name, if the path names a field rather than a whole entry.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.index, self.name) {
            (Some(index), Some(name)) => write!(f, "benchmarks[{}].{}", index, name),
            (Some(index), None) => write!(f, "benchmarks[{}]", index),
            (None, Some(name)) => write!(f, "{}", name),
            (None, None) => write!(f, "(document)"),
        }
    }
}

/// Terminal failure of a configuration parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {origin}: {message}")]
    Decode { origin: String, message: String },

    #[error("{field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field}: {reason}")]
    Validation { field: FieldPath, reason: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(origin: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub fn type_mismatch(field: FieldPath, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            field,
            expected,
            found,
        }
    }

    pub fn validation(field: FieldPath, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Machine-readable tag for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::IoError,
            Self::Decode { .. } => ErrorCode::DecodeError,
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::Validation { .. } => ErrorCode::ValidationError,
        }
    }

    /// The offending field, for type and validation errors.
    pub fn field(&self) -> Option<&FieldPath> {
        match self {
            Self::TypeMismatch { field, .. } | Self::Validation { field, .. } => Some(field),
            Self::Io { .. } | Self::Decode { .. } => None,
        }
    }

    /// Index of the offending benchmark entry, if any.
    pub fn index(&self) -> Option<usize> {
        self.field().and_then(FieldPath::index)
    }

    /// Serializable summary of this error.
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code(),
            message: self.to_string(),
            field: self.field().map(ToString::to_string),
            index: self.index(),
        }
    }
}

/// Structured error for JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_display() {
        assert_eq!(FieldPath::global("max_time").to_string(), "max_time");
        assert_eq!(FieldPath::entry(3).to_string(), "benchmarks[3]");
        assert_eq!(
            FieldPath::entry_field(3, "filename").to_string(),
            "benchmarks[3].filename"
        );
    }

    #[test]
    fn test_validation_error_carries_context() {
        let err = ConfigError::validation(FieldPath::entry_field(2, "filename"), "must not be empty");
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.index(), Some(2));
        assert_eq!(err.field().and_then(FieldPath::name), Some("filename"));
        assert_eq!(err.to_string(), "benchmarks[2].filename: must not be empty");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ConfigError::type_mismatch(FieldPath::global("scenario_name"), "string", "integer");
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.index(), None);
        assert_eq!(
            err.to_string(),
            "scenario_name: expected string, found integer"
        );
    }

    #[test]
    fn test_io_error_is_single_line() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::io("missing.json", source);
        assert_eq!(err.code(), ErrorCode::IoError);
        assert!(err.field().is_none());
        let rendered = err.to_string();
        assert!(rendered.contains("missing.json"));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_report_serializes_code() {
        let err = ConfigError::validation(FieldPath::global("benchmarks"), "benchmark_count must not be 0");
        let json = serde_json::to_value(err.report()).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["field"], "benchmarks");
        assert!(json.get("index").is_none());
    }
}
