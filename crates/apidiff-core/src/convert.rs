//! # JSON to YAML Conversion
//!
//! Pure re-serialization: the parsed value is written back out as
//! block-style YAML with keys in the order they were read and non-ASCII
//! text left unescaped. No validation and no value rewriting happens here.
//!
//! Numbers are parsed with `serde_json/arbitrary_precision`, so integers
//! wider than 64 bits keep every digit and are emitted as 128-bit YAML
//! integers. An integer that does not fit in 128 bits is rejected rather
//! than rounded.

use std::path::{Path, PathBuf};

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::document::{parse_document, DocumentFormat};
use crate::error::DocumentError;

/// Outcome of a file conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// JSON file that was read.
    pub input: PathBuf,
    /// YAML file that was written.
    pub output: PathBuf,
    /// Size of the input in bytes.
    pub input_bytes: usize,
    /// Size of the output in bytes.
    pub output_bytes: usize,
}

/// Serialize a document value as YAML.
pub fn convert_value(value: &Value) -> Result<String, DocumentError> {
    serde_yaml::to_string(&YamlValue(value)).map_err(|e| DocumentError::Serialize(e.to_string()))
}

/// YAML view of a document value.
///
/// `serde_json::Value` serializes arbitrary-precision numbers through a
/// private marker struct only `serde_json` understands; this walks the tree
/// and hands every number to the serializer as a native integer or float.
struct YamlValue<'a>(&'a Value);

impl Serialize for YamlValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => serializer.collect_seq(items.iter().map(YamlValue)),
            Value::Object(map) => {
                serializer.collect_map(map.iter().map(|(k, v)| (k, YamlValue(v))))
            }
        }
    }
}

fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(i) = n.as_i64() {
        serializer.serialize_i64(i)
    } else if let Some(u) = n.as_u64() {
        serializer.serialize_u64(u)
    } else if let Some(i) = n.as_i128() {
        serializer.serialize_i128(i)
    } else if let Some(u) = n.as_u128() {
        serializer.serialize_u128(u)
    } else if is_integer_literal(n.as_str()) {
        Err(S::Error::custom(format!("integer {n} does not fit in 128 bits")))
    } else {
        match n.as_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => Err(S::Error::custom(format!("number {n} is out of range"))),
        }
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parse JSON text and serialize it as YAML.
pub fn convert_str(json: &str) -> Result<String, DocumentError> {
    let value = parse_document(json, DocumentFormat::Json, "<input>")?;
    convert_value(&value)
}

/// Read a JSON file and write its YAML rendition to `output`.
///
/// The output file is only written once the whole document has been
/// parsed and serialized; a malformed input leaves `output` untouched.
pub fn convert_file(input: &Path, output: &Path) -> Result<ConversionSummary, DocumentError> {
    let json = std::fs::read_to_string(input).map_err(|source| DocumentError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let value = parse_document(&json, DocumentFormat::Json, &input.display().to_string())?;
    let yaml = convert_value(&value)?;

    std::fs::write(output, yaml.as_bytes()).map_err(|source| DocumentError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        "converted JSON document to YAML"
    );

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        input_bytes: json.len(),
        output_bytes: yaml.len(),
    })
}
