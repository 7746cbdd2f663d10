//! # Schema Set Difference
//!
//! Splits the union of two documents' base names into names only in the
//! old document, names only in the new one and names in both. Sets are
//! ordered so every report built from them is deterministic.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::classify::ClassifiedSchemas;

/// Base names of two classified documents, partitioned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    /// Present in old, absent in new.
    pub only_in_old: BTreeSet<String>,
    /// Present in new, absent in old.
    pub only_in_new: BTreeSet<String>,
    /// Present in both.
    pub common: BTreeSet<String>,
}

impl SchemaDiff {
    /// Diff the base entries of two classified documents.
    pub fn between(old: &ClassifiedSchemas<'_>, new: &ClassifiedSchemas<'_>) -> Self {
        Self::of_names(
            old.bases().keys().copied(),
            new.bases().keys().copied(),
        )
    }

    /// Diff two plain name sets.
    pub fn of_names<'a>(
        old: impl IntoIterator<Item = &'a str>,
        new: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let old: BTreeSet<&str> = old.into_iter().collect();
        let new: BTreeSet<&str> = new.into_iter().collect();

        Self {
            only_in_old: old.difference(&new).map(|s| s.to_string()).collect(),
            only_in_new: new.difference(&old).map(|s| s.to_string()).collect(),
            common: old.intersection(&new).map(|s| s.to_string()).collect(),
        }
    }

    /// Every name in either document.
    pub fn union(&self) -> BTreeSet<&str> {
        self.only_in_old
            .iter()
            .chain(&self.only_in_new)
            .chain(&self.common)
            .map(String::as_str)
            .collect()
    }
}
