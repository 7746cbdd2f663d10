//! # apidiff-schema — Schema Comparison
//!
//! Compares the data-type definitions of two versions of an API
//! description, typically a Swagger 2.0 document (`definitions`) against
//! its OpenAPI 3.x successor (`components.schemas`).
//!
//! ## Pipeline
//!
//! 1. [`dialect`] — pull the named schemas out of each document.
//! 2. [`classify`] — split them into base entries and `_Create` /
//!    `_Update` / `_FVO` / `_MVO` variants grouped by base name.
//! 3. [`diff`] — partition base names into old-only, new-only and common.
//! 4. [`properties`] — effective property maps and type tags of common
//!    schemas.
//! 5. [`report`] / [`render`] — the structured report and its text or
//!    JSON rendering.
//!
//! Everything is read-only analysis over two documents loaded up front.
//! Any malformed shape fails the whole comparison.

pub mod classify;
pub mod config;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod properties;
pub mod render;
pub mod report;

use std::path::Path;

pub use classify::{base_name, is_variant, ClassifiedSchemas, VariantSuffixes};
pub use config::ComparisonConfig;
pub use dialect::{DialectSelection, SchemaDialect, SchemaDocument};
pub use diff::SchemaDiff;
pub use error::SchemaError;
pub use properties::{PropertyType, SchemaEntry};
pub use render::{render_json, render_text, truncate, Ellipsis};
pub use report::{ComparisonReport, PropertyChange, PropertyRow, SchemaComparison, SchemaListing};

/// Compare two loaded schema documents.
pub fn compare_documents(
    old: &SchemaDocument,
    new: &SchemaDocument,
    config: &ComparisonConfig,
) -> Result<ComparisonReport, SchemaError> {
    ComparisonReport::build(old, new, config)
}

/// Load two documents from disk and compare them.
///
/// Dialects come from `config.old_dialect` / `config.new_dialect`. Both
/// documents are fully loaded before any analysis starts.
pub fn compare_files(
    old_path: &Path,
    new_path: &Path,
    config: &ComparisonConfig,
) -> Result<ComparisonReport, SchemaError> {
    let old = SchemaDocument::load(old_path, config.old_dialect)?;
    let new = SchemaDocument::load(new_path, config.new_dialect)?;

    let report = compare_documents(&old, &new, config)?;

    tracing::info!(
        old = %old_path.display(),
        new = %new_path.display(),
        common = report.summary.common,
        only_in_old = report.summary.only_in_old,
        only_in_new = report.summary.only_in_new,
        "compared schema documents"
    );

    Ok(report)
}
