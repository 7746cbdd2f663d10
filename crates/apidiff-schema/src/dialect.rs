//! # Schema Dialects
//!
//! Where a document keeps its named type definitions depends on its
//! dialect:
//!
//! - Swagger 2.0 (OAS 2.0): flat `definitions` mapping at the root.
//! - OpenAPI 3.x (OAS 3.0): nested `components.schemas` mapping.
//!
//! [`SchemaDocument`] owns the extracted mapping. A document without the
//! dialect's root simply has no schemas; a root that exists but is not a
//! mapping, or an entry that is not a mapping, is an error.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use apidiff_core::load_document;

use crate::error::SchemaError;

/// Named schema definitions, in document order.
pub type SchemaMap = Map<String, Value>;

/// Layout of an API description document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDialect {
    /// Swagger 2.0: schemas under `definitions`.
    Swagger2,
    /// OpenAPI 3.x: schemas under `components.schemas`.
    #[serde(rename = "openapi3")]
    OpenApi3,
}

impl SchemaDialect {
    /// Detect the dialect of a parsed document.
    ///
    /// The `swagger` / `openapi` version fields win; otherwise the presence
    /// of `definitions` or `components` decides. Returns `None` when the
    /// document carries none of these.
    pub fn detect(document: &Value) -> Option<Self> {
        if document.get("openapi").is_some() {
            Some(Self::OpenApi3)
        } else if document.get("swagger").is_some() {
            Some(Self::Swagger2)
        } else if document.get("components").is_some() {
            Some(Self::OpenApi3)
        } else if document.get("definitions").is_some() {
            Some(Self::Swagger2)
        } else {
            None
        }
    }

    /// Dotted path of the schema mapping, for messages.
    pub fn schema_root(&self) -> &'static str {
        match self {
            Self::Swagger2 => "definitions",
            Self::OpenApi3 => "components.schemas",
        }
    }

    /// Extract the schema mapping from a document, taking ownership of it.
    pub fn extract_schemas(&self, mut document: Value) -> Result<SchemaMap, SchemaError> {
        let root = match self {
            Self::Swagger2 => document.get_mut("definitions").map(Value::take),
            Self::OpenApi3 => match document.get_mut("components") {
                Some(Value::Object(components)) => components.remove("schemas"),
                Some(Value::Null) | None => None,
                Some(_) => {
                    return Err(SchemaError::NotAMapping {
                        context: "components".to_string(),
                    })
                }
            },
        };

        let schemas = match root {
            None | Some(Value::Null) => SchemaMap::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(SchemaError::NotAMapping {
                    context: self.schema_root().to_string(),
                })
            }
        };

        if let Some((name, _)) = schemas.iter().find(|(_, v)| !v.is_object()) {
            return Err(SchemaError::MalformedEntry {
                name: name.clone(),
                reason: "definition is not a mapping".to_string(),
            });
        }

        Ok(schemas)
    }
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swagger2 => f.write_str("OAS 2.0"),
            Self::OpenApi3 => f.write_str("OAS 3.0"),
        }
    }
}

/// How to pick the dialect of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectSelection {
    /// Detect from the document content.
    Auto,
    /// Treat the document as Swagger 2.0.
    Swagger2,
    /// Treat the document as OpenAPI 3.x.
    #[serde(rename = "openapi3")]
    OpenApi3,
}

impl DialectSelection {
    /// Resolve the selection against a document.
    pub fn resolve(&self, document: &Value, origin: &str) -> Result<SchemaDialect, SchemaError> {
        match self {
            Self::Swagger2 => Ok(SchemaDialect::Swagger2),
            Self::OpenApi3 => Ok(SchemaDialect::OpenApi3),
            Self::Auto => SchemaDialect::detect(document).ok_or_else(|| {
                SchemaError::UnknownDialect {
                    origin: origin.to_string(),
                }
            }),
        }
    }
}

/// The schema definitions of one loaded document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    dialect: SchemaDialect,
    schemas: SchemaMap,
}

impl SchemaDocument {
    /// Build from an already parsed document.
    pub fn from_value(
        document: Value,
        selection: DialectSelection,
        origin: &str,
    ) -> Result<Self, SchemaError> {
        let dialect = selection.resolve(&document, origin)?;
        let schemas = dialect.extract_schemas(document)?;

        tracing::debug!(
            origin,
            %dialect,
            schemas = schemas.len(),
            "extracted schema definitions"
        );

        Ok(Self { dialect, schemas })
    }

    /// Load a JSON or YAML document from disk.
    pub fn load(path: &Path, selection: DialectSelection) -> Result<Self, SchemaError> {
        let document = load_document(path)?;
        Self::from_value(document, selection, &path.display().to_string())
    }

    /// Dialect the schemas were extracted with.
    pub fn dialect(&self) -> SchemaDialect {
        self.dialect
    }

    /// All named schemas, in document order.
    pub fn schemas(&self) -> &SchemaMap {
        &self.schemas
    }

    /// Look up one schema definition by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Number of named schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when the document defines no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
