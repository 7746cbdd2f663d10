//! # apidiff-cli — API Description Toolkit
//!
//! Provides the `apidiff` command-line interface.
//!
//! ## Subcommands
//!
//! - `apidiff convert` — JSON API description to YAML.
//! - `apidiff compare` — schema diff report of two API versions.
//!
//! ```bash
//! apidiff convert api_swagger.json api_swagger.yaml
//! apidiff compare api_swagger.yaml api.oas.yaml --format json
//! ```
//!
//! Argument parsing lives here; the work is done by `apidiff-core` and
//! `apidiff-schema`.

pub mod compare;
pub mod convert;
