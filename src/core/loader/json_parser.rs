//! JSON loader for certification-specification documents

use crate::core::models::{Document, Section};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a document
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The file is not valid JSON
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
    /// The top-level JSON value is not an object
    #[error("expected a JSON object mapping subpart names to sections, found {found}")]
    NotAnObject {
        /// JSON type that was found instead
        found: &'static str,
    },
    /// A subpart's sections do not match the expected schema
    #[error("malformed sections in subpart '{subpart}': {source}")]
    Schema {
        /// Name of the offending subpart
        subpart: String,
        /// Underlying deserialization error
        source: serde_json::Error,
    },
}

impl Document {
    /// Parse a document from a JSON string
    ///
    /// The top level must be an object; each value must be a list of section
    /// records. Key order is preserved.
    ///
    /// # Errors
    /// Returns [`LoadError::Parse`] (with an empty path) for invalid JSON,
    /// [`LoadError::NotAnObject`] or [`LoadError::Schema`] for shape errors.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(json).map_err(|source| LoadError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        Self::from_json_value(value)
    }

    /// Build a document from an already parsed JSON value
    ///
    /// # Errors
    /// Returns [`LoadError::NotAnObject`] or [`LoadError::Schema`] for shape errors.
    pub fn from_json_value(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Object(map) => parse_subparts(map),
            other => Err(LoadError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }
}

fn parse_subparts(map: Map<String, Value>) -> Result<Document, LoadError> {
    let mut document = Document::new();
    for (name, value) in map {
        let sections: Vec<Section> =
            serde_json::from_value(value).map_err(|source| LoadError::Schema {
                subpart: name.clone(),
                source,
            })?;
        debug!(subpart = %name, sections = sections.len(), "parsed subpart");
        document.add_subpart(name, sections);
    }
    Ok(document)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load a document from a JSON file
///
/// # Arguments
/// * `path` - Path to the JSON file
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or does
/// not match the document schema.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let document = Document::from_json_value(value)?;
    info!(
        path = %path.display(),
        subparts = document.subpart_count(),
        sections = document.section_count(),
        "document loaded"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_key_order() {
        let doc = Document::from_json_str(
            r#"{"Subpart Z": [], "Subpart A": [], "Subpart M": []}"#,
        )
        .unwrap();
        let names: Vec<_> = doc.subparts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Subpart Z", "Subpart A", "Subpart M"]);
    }

    #[test]
    fn test_rejects_non_object() {
        let err = Document::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn test_schema_error_names_subpart() {
        let err = Document::from_json_str(r#"{"B": [{"CS Name": "no number"}]}"#).unwrap_err();
        match err {
            LoadError::Schema { subpart, .. } => assert_eq!(subpart, "B"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_subpart_value_must_be_list() {
        let err = Document::from_json_str(r#"{"B": {"CS Number": "1"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = Document::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_document("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
