//! # Property Extraction & Typing
//!
//! [`SchemaEntry::properties`] computes the effective property set of one
//! schema: its direct `properties`, then the `properties` of every inline
//! `allOf` member in listed order (last write wins). Members that are
//! `$ref`s contribute nothing; references are never resolved.
//!
//! [`PropertyType::classify`] reduces a property definition to a short
//! tag used to spot type changes between versions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// Effective properties of a schema, keyed by property name.
pub type PropertyMap<'a> = BTreeMap<&'a str, &'a Value>;

/// Classified type of a property definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// `$ref` to another schema, holding the final path segment.
    Ref(String),
    /// A direct `type` tag (`string`, `array`, ...).
    Type(String),
    /// An `allOf` composition.
    AllOf,
    /// A `oneOf` alternation.
    OneOf,
    /// Anything else.
    Complex,
}

impl PropertyType {
    /// Classify a property definition.
    ///
    /// Total and ordered: `$ref`, then `type`, then `allOf`, then `oneOf`,
    /// otherwise `complex`. A definition that is not a mapping is `complex`.
    pub fn classify(definition: &Value) -> Self {
        let Some(map) = definition.as_object() else {
            return Self::Complex;
        };

        if let Some(reference) = map.get("$ref") {
            let target = match reference {
                Value::String(s) => s.rsplit('/').next().unwrap_or(s.as_str()).to_string(),
                other => other.to_string(),
            };
            Self::Ref(target)
        } else if let Some(tag) = map.get("type") {
            Self::Type(match tag {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        } else if map.contains_key("allOf") {
            Self::AllOf
        } else if map.contains_key("oneOf") {
            Self::OneOf
        } else {
            Self::Complex
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(target) => write!(f, "ref:{target}"),
            Self::Type(tag) => f.write_str(tag),
            Self::AllOf => f.write_str("allOf"),
            Self::OneOf => f.write_str("oneOf"),
            Self::Complex => f.write_str("complex"),
        }
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One named schema definition.
#[derive(Debug, Clone, Copy)]
pub struct SchemaEntry<'a> {
    name: &'a str,
    definition: &'a Map<String, Value>,
}

impl<'a> SchemaEntry<'a> {
    /// Wrap a named definition, which must be a mapping.
    pub fn new(name: &'a str, definition: &'a Value) -> Result<Self, SchemaError> {
        let definition = definition
            .as_object()
            .ok_or_else(|| malformed(name, "definition is not a mapping"))?;
        Ok(Self { name, definition })
    }

    /// Schema name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The entry's own `description`.
    pub fn description(&self) -> Result<Option<&'a str>, SchemaError> {
        description_of(self.name, self.definition)
    }

    /// The `description` of the first `allOf` member that has one.
    pub fn composed_description(&self) -> Result<Option<&'a str>, SchemaError> {
        for member in self.composed_members()? {
            if let Some(desc) = description_of(self.name, member)? {
                return Ok(Some(desc));
            }
        }
        Ok(None)
    }

    /// Own description, falling back to the first composed one.
    pub fn effective_description(&self) -> Result<Option<&'a str>, SchemaError> {
        match self.description()? {
            Some(desc) => Ok(Some(desc)),
            None => self.composed_description(),
        }
    }

    /// Effective property map: direct properties, then inline `allOf`
    /// members in order. Later sources overwrite earlier ones.
    pub fn properties(&self) -> Result<PropertyMap<'a>, SchemaError> {
        let mut props = PropertyMap::new();

        if let Some(direct) = properties_of(self.name, self.definition)? {
            props.extend(direct.iter().map(|(k, v)| (k.as_str(), v)));
        }

        for member in self.composed_members()? {
            if member.contains_key("$ref") {
                continue;
            }
            if let Some(inline) = properties_of(self.name, member)? {
                props.extend(inline.iter().map(|(k, v)| (k.as_str(), v)));
            }
        }

        Ok(props)
    }

    fn composed_members(&self) -> Result<Vec<&'a Map<String, Value>>, SchemaError> {
        match self.definition.get("allOf") {
            None => Ok(Vec::new()),
            Some(Value::Array(members)) => members
                .iter()
                .map(|m| {
                    m.as_object()
                        .ok_or_else(|| malformed(self.name, "allOf member is not a mapping"))
                })
                .collect(),
            Some(_) => Err(malformed(self.name, "allOf is not a sequence")),
        }
    }
}

fn description_of<'a>(
    name: &str,
    map: &'a Map<String, Value>,
) -> Result<Option<&'a str>, SchemaError> {
    match map.get("description") {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(malformed(name, "description is not a string")),
    }
}

fn properties_of<'a>(
    name: &str,
    map: &'a Map<String, Value>,
) -> Result<Option<&'a Map<String, Value>>, SchemaError> {
    match map.get("properties") {
        None => Ok(None),
        Some(Value::Object(props)) => Ok(Some(props)),
        Some(_) => Err(malformed(name, "properties is not a mapping")),
    }
}

fn malformed(name: &str, reason: &str) -> SchemaError {
    SchemaError::MalformedEntry {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
