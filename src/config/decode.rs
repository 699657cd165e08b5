//! Structured-value decoding.
//!
//! Turns raw document text into a `serde_json::Value` tree. JSON and YAML are
//! both decoded into the same tree type so the resolver only walks one shape.

use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Origin name used in decode errors for in-memory documents.
const INLINE_ORIGIN: &str = "<input>";

/// Syntax of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension. Anything that is not
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Decode document text into an object tree.
pub fn decode_str(text: &str, format: DocumentFormat) -> ConfigResult<Value> {
    decode_with_origin(text, format, INLINE_ORIGIN)
}

/// Read and decode the document at `path`.
pub fn read_document(path: &Path) -> ConfigResult<Value> {
    let bytes = std::fs::read(path).map_err(|err| ConfigError::io(path, err))?;
    let origin = path.display().to_string();
    let content = String::from_utf8(bytes).map_err(|err| ConfigError::decode(origin.as_str(), err))?;
    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), ?format, bytes = content.len(), "Decoding configuration");
    decode_with_origin(&content, format, &origin)
}

fn decode_with_origin(text: &str, format: DocumentFormat, origin: &str) -> ConfigResult<Value> {
    let value = match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(text).map_err(|err| ConfigError::decode(origin, err))?
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(text).map_err(|err| ConfigError::decode(origin, err))?
        }
    };

    if !value.is_object() {
        return Err(ConfigError::decode(
            origin,
            "top-level value must be an object",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.YML")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("config")), DocumentFormat::Json);
    }

    #[test]
    fn test_decode_json_object() {
        let value = decode_str(r#"{"max_time": 5.0}"#, DocumentFormat::Json).unwrap();
        assert_eq!(value["max_time"], 5.0);
    }

    #[test]
    fn test_decode_yaml_into_same_tree() {
        let yaml = "max_iterations: 10\nbenchmarks:\n  - filename: a.so\n";
        let value = decode_str(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(value["max_iterations"], 10);
        assert_eq!(value["benchmarks"][0]["filename"], "a.so");
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let err = decode_str(r#"{"benchmarks": ["#, DocumentFormat::Json).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecodeError);
        assert!(err.to_string().starts_with("cannot decode <input>:"));
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = decode_str("[1, 2, 3]", DocumentFormat::Json).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecodeError);
        assert!(err.to_string().contains("top-level value must be an object"));
    }
}
