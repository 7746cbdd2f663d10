//! # Comparison Configuration
//!
//! Knobs of a schema comparison. Every field has a default matching the
//! TMF620 v4.1.0 → v5.0.0 comparison, so an empty config file (or none at
//! all) reproduces the stock report.
//!
//! ```yaml
//! title: TMF620 Product Catalog Management API - Schema Comparison
//! old_label: v4.1.0
//! new_label: v5.0.0
//! old_dialect: swagger2
//! new_dialect: openapi3
//! variant_suffixes: [_Create, _Update, _FVO, _MVO]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::VariantSuffixes;
use crate::dialect::DialectSelection;
use crate::error::SchemaError;

/// Property names that carry polymorphism metadata only. A schema whose
/// properties are all drawn from this set has no comparable shape.
pub const DEFAULT_METADATA_PROPERTIES: &[&str] =
    &["@baseType", "@schemaLocation", "@type", "@referredType"];

/// Settings for one old-vs-new comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Report heading.
    pub title: String,
    /// Label of the old document (e.g. `v4.1.0`).
    pub old_label: String,
    /// Label of the new document (e.g. `v5.0.0`).
    pub new_label: String,
    /// Dialect of the old document.
    pub old_dialect: DialectSelection,
    /// Dialect of the new document.
    pub new_dialect: DialectSelection,
    /// Variant suffixes, in priority order.
    pub variant_suffixes: VariantSuffixes,
    /// Metadata-only property names.
    pub metadata_properties: Vec<String>,
    /// Description width in the only-in-old / only-in-new listings.
    pub listing_description_limit: usize,
    /// Description width in the side-by-side comparison.
    pub comparison_description_limit: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            title: "TMF620 Product Catalog Management API - Schema Comparison".to_string(),
            old_label: "v4.1.0".to_string(),
            new_label: "v5.0.0".to_string(),
            old_dialect: DialectSelection::Swagger2,
            new_dialect: DialectSelection::OpenApi3,
            variant_suffixes: VariantSuffixes::default(),
            metadata_properties: DEFAULT_METADATA_PROPERTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            listing_description_limit: 120,
            comparison_description_limit: 80,
        }
    }
}

impl ComparisonConfig {
    /// Parse a YAML config. Missing fields take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| SchemaError::ConfigParse { source })
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded comparison config");
        Ok(config)
    }

    /// True when every name is metadata-only (vacuously true when empty).
    pub fn is_metadata_only<'n, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'n str>,
    {
        names
            .into_iter()
            .all(|name| self.metadata_properties.iter().any(|m| m == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ComparisonConfig::default();
        assert_eq!(config.old_label, "v4.1.0");
        assert_eq!(config.new_label, "v5.0.0");
        assert_eq!(config.old_dialect, DialectSelection::Swagger2);
        assert_eq!(config.new_dialect, DialectSelection::OpenApi3);
        assert_eq!(config.listing_description_limit, 120);
        assert_eq!(config.comparison_description_limit, 80);
        assert_eq!(config.metadata_properties.len(), 4);
    }

    #[test]
    fn empty_text_is_default() {
        assert_eq!(ComparisonConfig::from_yaml_str("").unwrap(), ComparisonConfig::default());
        assert_eq!(ComparisonConfig::from_yaml_str("  \n").unwrap(), ComparisonConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let config = ComparisonConfig::from_yaml_str(
            "old_label: v4\nnew_dialect: auto\nvariant_suffixes: [_Input]\n",
        )
        .unwrap();
        assert_eq!(config.old_label, "v4");
        assert_eq!(config.new_label, "v5.0.0");
        assert_eq!(config.new_dialect, DialectSelection::Auto);
        assert!(config.variant_suffixes.is_variant("Catalog_Input"));
        assert!(!config.variant_suffixes.is_variant("Catalog_FVO"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = ComparisonConfig::from_yaml_str("old_lable: v4\n").unwrap_err();
        assert!(matches!(err, SchemaError::ConfigParse { .. }), "got: {err}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("compare.yaml");
        std::fs::write(&path, "title: Custom\n").unwrap();
        assert_eq!(ComparisonConfig::load(&path).unwrap().title, "Custom");

        let err = ComparisonConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        match &err {
            SchemaError::ConfigRead { path, source } => {
                assert!(path.ends_with("absent.yaml"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected ConfigRead, got: {other}"),
        }
    }

    #[test]
    fn empty_variant_suffixes_are_dropped_on_load() {
        let config = ComparisonConfig::from_yaml_str("variant_suffixes: [\"\", _Input]\n").unwrap();
        assert_eq!(config.variant_suffixes.as_slice(), ["_Input".to_string()]);
        for name in ["Foo", "Foo_Input", ""] {
            assert_eq!(
                config.variant_suffixes.is_variant(name),
                config.variant_suffixes.base_name(name) != name,
                "{name}"
            );
        }
        assert!(!config.variant_suffixes.is_variant("Foo"));

        let only_empty = ComparisonConfig::from_yaml_str("variant_suffixes: [\"\"]\n").unwrap();
        assert!(only_empty.variant_suffixes.as_slice().is_empty());
        assert!(!only_empty.variant_suffixes.is_variant("Foo"));
    }

    #[test]
    fn variant_suffixes_serialize_as_a_list() {
        let yaml = serde_yaml::to_string(&ComparisonConfig::default()).unwrap();
        let back = ComparisonConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, ComparisonConfig::default());
    }

    #[test]
    fn metadata_only_is_subset_check() {
        let config = ComparisonConfig::default();
        assert!(config.is_metadata_only(std::iter::empty()));
        assert!(config.is_metadata_only(["@type"]));
        assert!(config.is_metadata_only(["@baseType", "@referredType", "@schemaLocation", "@type"]));
        assert!(!config.is_metadata_only(["@type", "id"]));
    }
}
