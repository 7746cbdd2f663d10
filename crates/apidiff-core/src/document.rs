//! # Document Loading
//!
//! Reads API description documents from disk into a dynamic
//! [`serde_json::Value`] tree.
//!
//! The format is chosen from the file extension: `.json` is parsed as
//! JSON, everything else as YAML (a JSON document is also valid YAML, so
//! an unknown extension still loads). YAML values are bridged into the
//! JSON value model by [`yaml_to_json`].

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::DocumentError;

/// Serialization format of a document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format for a path from its extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Short lowercase name, as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}

/// Parse document text in the given format.
///
/// `origin` labels the source in error messages (usually the file path).
pub fn parse_document(
    text: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, DocumentError> {
    let parse_error = |reason: String| DocumentError::Parse {
        origin: origin.to_string(),
        format,
        reason,
    };

    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            yaml_to_json(&yaml)
        }
    }
}

/// Load a document from disk, detecting its format from the extension.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] when the file cannot be read and
/// [`DocumentError::Parse`] / [`DocumentError::Conversion`] when its
/// content is not a valid document.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let format = DocumentFormat::from_path(path);
    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), %format, bytes = text.len(), "loading document");

    parse_document(&text, format, &path.display().to_string())
}

/// Convert a `serde_yaml::Value` into a `serde_json::Value`.
///
/// YAML is richer than JSON (tags, non-string keys, non-finite floats).
/// API descriptions stay inside the JSON-compatible subset, so tags are
/// dropped, scalar keys are stringified and anything else is rejected.
/// Mapping order is carried over unchanged.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, DocumentError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| {
                        DocumentError::Conversion(format!("cannot represent float {f} in JSON"))
                    })
            } else {
                Err(DocumentError::Conversion(format!(
                    "unsupported YAML number: {n:?}"
                )))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(DocumentError::Conversion(format!(
                            "unsupported YAML map key: {other:?}"
                        )))
                    }
                };
                object.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
