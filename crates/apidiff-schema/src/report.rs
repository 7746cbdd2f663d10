//! # Comparison Report
//!
//! Structured result of comparing two schema documents. The report is
//! built completely (and fails as a whole on malformed input) before any
//! rendering happens; see [`crate::render`] for the text and JSON forms.

use serde::Serialize;

use crate::classify::ClassifiedSchemas;
use crate::config::ComparisonConfig;
use crate::dialect::{SchemaDialect, SchemaDocument};
use crate::diff::SchemaDiff;
use crate::error::SchemaError;
use crate::properties::{PropertyMap, PropertyType, SchemaEntry};

/// One side of the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    /// Version label (e.g. `v4.1.0`).
    pub label: String,
    /// Dialect the schemas were read with.
    pub dialect: SchemaDialect,
    /// Number of base schemas.
    pub base_schemas: usize,
    /// Number of variant schemas.
    pub variant_schemas: usize,
}

/// Headline counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Base schemas in both documents.
    pub common: usize,
    /// Base schemas only in the old document.
    pub only_in_old: usize,
    /// Base schemas only in the new document.
    pub only_in_new: usize,
}

/// A schema present on one side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaListing {
    /// Schema name.
    pub name: String,
    /// Description, if the schema has one.
    pub description: Option<String>,
}

/// How one property differs between the versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PropertyChange {
    /// Same type tag on both sides.
    Unchanged {
        /// The shared type tag.
        #[serde(rename = "type")]
        type_tag: PropertyType,
    },
    /// Present on both sides with different type tags.
    TypeChanged {
        /// Old type tag.
        old: PropertyType,
        /// New type tag.
        new: PropertyType,
    },
    /// Only in the old version.
    Removed {
        /// Old type tag.
        old: PropertyType,
    },
    /// Only in the new version.
    Added {
        /// New type tag.
        new: PropertyType,
    },
}

/// One row of a property table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    /// Property name.
    pub name: String,
    /// What happened to it.
    #[serde(flatten)]
    pub change: PropertyChange,
}

/// Side-by-side comparison of a schema present in both documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaComparison {
    /// Schema (base) name.
    pub name: String,
    /// Old description.
    pub old_description: Option<String>,
    /// New description, falling back to the first composed description.
    pub new_description: Option<String>,
    /// Common properties (sorted), then removed (sorted), then added (sorted).
    pub properties: Vec<PropertyRow>,
    /// Old variants registered under this name, sorted.
    pub old_variants: Vec<String>,
    /// New variants registered under this name, sorted.
    pub new_variants: Vec<String>,
}

/// Full comparison of two schema documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    /// Report heading.
    pub title: String,
    /// Old document.
    pub old: DocumentInfo,
    /// New document.
    pub new: DocumentInfo,
    /// Headline counts.
    pub summary: Summary,
    /// Schemas only in the old document, sorted.
    pub only_in_old: Vec<SchemaListing>,
    /// Schemas only in the new document, sorted.
    pub only_in_new: Vec<SchemaListing>,
    /// Common schemas with a comparable shape, sorted.
    pub common: Vec<SchemaComparison>,
    /// Common schemas left out because they carry no comparable properties.
    pub skipped: Vec<String>,
}

impl ComparisonReport {
    /// Compare two loaded documents.
    pub fn build(
        old: &SchemaDocument,
        new: &SchemaDocument,
        config: &ComparisonConfig,
    ) -> Result<Self, SchemaError> {
        let old_classified = ClassifiedSchemas::classify(old.schemas(), &config.variant_suffixes);
        let new_classified = ClassifiedSchemas::classify(new.schemas(), &config.variant_suffixes);
        let diff = SchemaDiff::between(&old_classified, &new_classified);

        tracing::debug!(
            common = diff.common.len(),
            only_in_old = diff.only_in_old.len(),
            only_in_new = diff.only_in_new.len(),
            "classified schemas"
        );

        let mut only_in_old = Vec::with_capacity(diff.only_in_old.len());
        for name in &diff.only_in_old {
            let entry = base_entry(&old_classified, name)?;
            only_in_old.push(SchemaListing {
                name: name.clone(),
                description: entry.description()?.map(str::to_string),
            });
        }

        let mut only_in_new = Vec::with_capacity(diff.only_in_new.len());
        for name in &diff.only_in_new {
            let entry = base_entry(&new_classified, name)?;
            only_in_new.push(SchemaListing {
                name: name.clone(),
                description: entry.effective_description()?.map(str::to_string),
            });
        }

        let mut common = Vec::new();
        let mut skipped = Vec::new();
        for name in &diff.common {
            let old_entry = base_entry(&old_classified, name)?;
            let new_entry = base_entry(&new_classified, name)?;
            let old_props = old_entry.properties()?;
            let new_props = new_entry.properties()?;

            let all_names = old_props.keys().chain(new_props.keys()).copied();
            if config.is_metadata_only(all_names) {
                tracing::debug!(schema = %name, "skipping schema without comparable properties");
                skipped.push(name.clone());
                continue;
            }

            common.push(SchemaComparison {
                name: name.clone(),
                old_description: old_entry.description()?.map(str::to_string),
                new_description: new_entry.effective_description()?.map(str::to_string),
                properties: property_rows(&old_props, &new_props),
                old_variants: sorted_variants(&old_classified, name),
                new_variants: sorted_variants(&new_classified, name),
            });
        }

        Ok(Self {
            title: config.title.clone(),
            old: DocumentInfo {
                label: config.old_label.clone(),
                dialect: old.dialect(),
                base_schemas: old_classified.base_count(),
                variant_schemas: old_classified.variant_count(),
            },
            new: DocumentInfo {
                label: config.new_label.clone(),
                dialect: new.dialect(),
                base_schemas: new_classified.base_count(),
                variant_schemas: new_classified.variant_count(),
            },
            summary: Summary {
                common: diff.common.len(),
                only_in_old: diff.only_in_old.len(),
                only_in_new: diff.only_in_new.len(),
            },
            only_in_old,
            only_in_new,
            common,
            skipped,
        })
    }

    /// Look up the comparison of a common schema.
    pub fn comparison(&self, name: &str) -> Option<&SchemaComparison> {
        self.common.iter().find(|c| c.name == name)
    }
}

impl SchemaComparison {
    /// Look up one property row.
    pub fn property(&self, name: &str) -> Option<&PropertyRow> {
        self.properties.iter().find(|row| row.name == name)
    }
}

fn base_entry<'a>(
    classified: &ClassifiedSchemas<'a>,
    name: &str,
) -> Result<SchemaEntry<'a>, SchemaError> {
    let (name, definition) = classified
        .bases()
        .get_key_value(name)
        .map(|(k, v)| (*k, *v))
        .ok_or_else(|| SchemaError::MalformedEntry {
            name: name.to_string(),
            reason: "not a base schema".to_string(),
        })?;
    SchemaEntry::new(name, definition)
}

fn property_rows(old: &PropertyMap<'_>, new: &PropertyMap<'_>) -> Vec<PropertyRow> {
    let mut rows = Vec::with_capacity(old.len() + new.len());

    for (name, old_def) in old {
        if let Some(new_def) = new.get(name) {
            let old_type = PropertyType::classify(old_def);
            let new_type = PropertyType::classify(new_def);
            let change = if old_type == new_type {
                PropertyChange::Unchanged { type_tag: old_type }
            } else {
                PropertyChange::TypeChanged {
                    old: old_type,
                    new: new_type,
                }
            };
            rows.push(PropertyRow {
                name: name.to_string(),
                change,
            });
        }
    }

    rows.extend(
        old.iter()
            .filter(|(name, _)| !new.contains_key(*name))
            .map(|(name, def)| PropertyRow {
                name: name.to_string(),
                change: PropertyChange::Removed {
                    old: PropertyType::classify(def),
                },
            }),
    );

    rows.extend(
        new.iter()
            .filter(|(name, _)| !old.contains_key(*name))
            .map(|(name, def)| PropertyRow {
                name: name.to_string(),
                change: PropertyChange::Added {
                    new: PropertyType::classify(def),
                },
            }),
    );

    rows
}

fn sorted_variants(classified: &ClassifiedSchemas<'_>, base: &str) -> Vec<String> {
    let mut variants: Vec<String> = classified
        .variants_of(base)
        .iter()
        .map(|v| v.to_string())
        .collect();
    variants.sort();
    variants
}
