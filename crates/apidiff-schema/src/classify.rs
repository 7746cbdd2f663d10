//! # Schema Classification
//!
//! Splits a document's named schemas into *base* entries and *variants*.
//! A variant is a request-shape companion of a base entity, recognized by
//! a name suffix: `Catalog_Create`, `Catalog_Update` (Swagger 2.0 naming)
//! or `Catalog_FVO`, `Catalog_MVO` (OpenAPI 3.x naming). Variants are
//! grouped under the base name they derive from.
//!
//! Suffixes are checked in a fixed order and the first match wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialect::SchemaMap;

/// Suffixes marking variant schemas, in priority order.
pub const DEFAULT_VARIANT_SUFFIXES: &[&str] = &["_Create", "_Update", "_FVO", "_MVO"];

/// Ordered list of recognized variant suffixes.
///
/// Deserialization goes through [`VariantSuffixes::new`], so a config can
/// never smuggle in an empty suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct VariantSuffixes(Vec<String>);

impl Default for VariantSuffixes {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT_SUFFIXES.iter().copied())
    }
}

impl From<Vec<String>> for VariantSuffixes {
    fn from(suffixes: Vec<String>) -> Self {
        Self::new(suffixes)
    }
}

impl From<VariantSuffixes> for Vec<String> {
    fn from(suffixes: VariantSuffixes) -> Self {
        suffixes.0
    }
}

impl VariantSuffixes {
    /// Build from an explicit ordered list. Empty suffixes are dropped
    /// since they would match every name.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            suffixes
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    /// The suffixes in priority order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The first suffix that `name` ends with, if any.
    pub fn matching_suffix(&self, name: &str) -> Option<&str> {
        first_suffix(self.0.iter().map(String::as_str), name)
    }

    /// Strip the first matching suffix; names without one come back unchanged.
    pub fn base_name<'n>(&self, name: &'n str) -> &'n str {
        strip_suffix(name, self.matching_suffix(name))
    }

    /// True iff `name` ends with any recognized suffix.
    pub fn is_variant(&self, name: &str) -> bool {
        self.matching_suffix(name).is_some()
    }
}

/// [`VariantSuffixes::base_name`] with the default suffixes.
pub fn base_name(name: &str) -> &str {
    strip_suffix(name, first_suffix(DEFAULT_VARIANT_SUFFIXES.iter().copied(), name))
}

/// [`VariantSuffixes::is_variant`] with the default suffixes.
pub fn is_variant(name: &str) -> bool {
    first_suffix(DEFAULT_VARIANT_SUFFIXES.iter().copied(), name).is_some()
}

fn first_suffix<'s>(mut suffixes: impl Iterator<Item = &'s str>, name: &str) -> Option<&'s str> {
    suffixes.find(|suffix| !suffix.is_empty() && name.ends_with(suffix))
}

fn strip_suffix<'n>(name: &'n str, suffix: Option<&str>) -> &'n str {
    match suffix {
        Some(suffix) => &name[..name.len() - suffix.len()],
        None => name,
    }
}

/// Base entries and variant groups of one document.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedSchemas<'a> {
    bases: BTreeMap<&'a str, &'a Value>,
    variants: BTreeMap<&'a str, Vec<&'a str>>,
}

impl<'a> ClassifiedSchemas<'a> {
    /// Classify every schema of a document.
    pub fn classify(schemas: &'a SchemaMap, suffixes: &VariantSuffixes) -> Self {
        let mut classified = Self::default();
        for (name, definition) in schemas {
            let name = name.as_str();
            if suffixes.is_variant(name) {
                classified
                    .variants
                    .entry(suffixes.base_name(name))
                    .or_default()
                    .push(name);
            } else {
                classified.bases.insert(name, definition);
            }
        }
        classified
    }

    /// Base entries keyed by name.
    pub fn bases(&self) -> &BTreeMap<&'a str, &'a Value> {
        &self.bases
    }

    /// Variant names grouped by base name, each group in document order.
    pub fn variants(&self) -> &BTreeMap<&'a str, Vec<&'a str>> {
        &self.variants
    }

    /// Definition of a base entry.
    pub fn base(&self, name: &str) -> Option<&'a Value> {
        self.bases.get(name).copied()
    }

    /// Variants registered under a base name (empty when none).
    pub fn variants_of(&self, base: &str) -> &[&'a str] {
        self.variants.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of base entries.
    pub fn base_count(&self) -> usize {
        self.bases.len()
    }

    /// Number of variant entries across all groups.
    pub fn variant_count(&self) -> usize {
        self.variants.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn schema_map(names: &[&str]) -> SchemaMap {
        names
            .iter()
            .map(|n| (n.to_string(), json!({"type": "object"})))
            .collect()
    }

    #[test]
    fn base_name_strips_each_suffix() {
        assert_eq!(base_name("Catalog_Create"), "Catalog");
        assert_eq!(base_name("Catalog_Update"), "Catalog");
        assert_eq!(base_name("Catalog_FVO"), "Catalog");
        assert_eq!(base_name("Catalog_MVO"), "Catalog");
        assert_eq!(base_name("Catalog"), "Catalog");
    }

    #[test]
    fn suffix_must_be_a_tail() {
        assert_eq!(base_name("Catalog_CreateEvent"), "Catalog_CreateEvent");
        assert!(!is_variant("Catalog_CreateEvent"));
        assert!(!is_variant("_Creat"));
    }

    #[test]
    fn whole_name_suffix_has_empty_base() {
        assert_eq!(base_name("_FVO"), "");
        assert!(is_variant("_FVO"));
    }

    #[test]
    fn first_matching_suffix_wins() {
        let suffixes = VariantSuffixes::new(["_Ref", "Ref"]);
        assert_eq!(suffixes.matching_suffix("CategoryRef"), Some("Ref"));
        assert_eq!(suffixes.matching_suffix("Category_Ref"), Some("_Ref"));
        assert_eq!(suffixes.base_name("Category_Ref"), "Category");
    }

    #[test]
    fn empty_suffixes_are_dropped() {
        let suffixes = VariantSuffixes::new(["", "_FVO"]);
        assert_eq!(suffixes.as_slice(), ["_FVO".to_string()]);
        assert!(!suffixes.is_variant("Catalog"));

        let converted = VariantSuffixes::from(vec![String::new(), "_MVO".to_string()]);
        assert_eq!(converted.as_slice(), ["_MVO".to_string()]);
        assert_eq!(converted.base_name("Catalog"), "Catalog");
    }

    #[test]
    fn default_suffixes_match_free_functions() {
        let suffixes = VariantSuffixes::default();
        for name in ["Catalog", "Catalog_FVO", "Category_Update", "X_MVO_Create", ""] {
            assert_eq!(suffixes.base_name(name), base_name(name));
            assert_eq!(suffixes.is_variant(name), is_variant(name));
        }
    }

    #[test]
    fn classify_groups_variants_under_base() {
        let map = schema_map(&[
            "Catalog",
            "Catalog_FVO",
            "Catalog_MVO",
            "Category",
            "Orphan_Create",
        ]);
        let classified = ClassifiedSchemas::classify(&map, &VariantSuffixes::default());

        let bases: Vec<&str> = classified.bases().keys().copied().collect();
        assert_eq!(bases, ["Catalog", "Category"]);
        assert_eq!(classified.variants_of("Catalog"), ["Catalog_FVO", "Catalog_MVO"]);
        assert_eq!(classified.variants_of("Orphan"), ["Orphan_Create"]);
        assert!(classified.variants_of("Category").is_empty());
        assert_eq!(classified.base_count(), 2);
        assert_eq!(classified.variant_count(), 3);
        assert!(classified.base("Orphan").is_none());
    }

    #[test]
    fn variant_groups_keep_document_order() {
        let map = schema_map(&["Catalog_Update", "Catalog", "Catalog_Create"]);
        let classified = ClassifiedSchemas::classify(&map, &VariantSuffixes::default());
        assert_eq!(
            classified.variants_of("Catalog"),
            ["Catalog_Update", "Catalog_Create"]
        );
    }

    fn schema_name() -> impl Strategy<Value = String> {
        ("[A-Z][a-zA-Z]{0,8}", prop::option::of(0usize..4)).prop_map(|(stem, suffix)| {
            match suffix {
                Some(i) => format!("{stem}{}", DEFAULT_VARIANT_SUFFIXES[i]),
                None => stem,
            }
        })
    }

    proptest! {
        /// Stripping removes exactly the matching suffix.
        #[test]
        fn base_name_removes_exact_suffix(name in schema_name()) {
            let base = base_name(&name);
            match DEFAULT_VARIANT_SUFFIXES.iter().find(|s| name.ends_with(*s)) {
                Some(suffix) => prop_assert_eq!(format!("{base}{suffix}"), name.clone()),
                None => prop_assert_eq!(base, name.as_str()),
            }
        }

        /// A second strip is a no-op for single-suffixed names.
        #[test]
        fn base_name_idempotent(name in schema_name()) {
            let once = base_name(&name);
            prop_assert_eq!(base_name(once), once);
        }

        /// `is_variant` agrees with `base_name` changing the name.
        #[test]
        fn is_variant_iff_base_differs(name in "[A-Za-z_]{0,12}") {
            prop_assert_eq!(is_variant(&name), base_name(&name) != name);
        }

        /// Every name lands in exactly one of bases or variant groups.
        #[test]
        fn classification_partitions_names(
            names in prop::collection::btree_set(schema_name(), 0..24)
        ) {
            let map: SchemaMap = names
                .iter()
                .map(|n| (n.clone(), json!({})))
                .collect();
            let classified = ClassifiedSchemas::classify(&map, &VariantSuffixes::default());

            let mut seen = BTreeSet::new();
            for name in classified.bases().keys() {
                prop_assert!(seen.insert(name.to_string()));
            }
            for (base, group) in classified.variants() {
                for name in group {
                    prop_assert_eq!(base_name(name), *base);
                    prop_assert!(seen.insert(name.to_string()));
                }
            }
            prop_assert_eq!(seen, names);
        }
    }
}
