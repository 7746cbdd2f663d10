//! # apidiff-core — Documents, Formats & Conversion
//!
//! Foundational layer shared by the schema comparator and the CLI.
//!
//! ## Documents (`document`)
//!
//! API description files are loaded wholesale into a schema-free
//! [`serde_json::Value`] tree. Mapping key order is preserved exactly as
//! encountered (`serde_json/preserve_order`), so every downstream consumer
//! sees entries in document order. YAML input is parsed with `serde_yaml`
//! and bridged into the same value tree.
//!
//! ## Conversion (`convert`)
//!
//! [`convert::convert_file`] re-serializes a JSON API description as
//! block-style YAML without touching its structure: same keys, same order,
//! non-ASCII text emitted verbatim.
//!
//! ## Crate Policy
//!
//! - No domain knowledge of Swagger/OpenAPI lives here; this crate only
//!   moves documents between bytes and values.
//! - Fail fast: malformed input is an error, never a partial value.

pub mod convert;
pub mod document;
pub mod error;

pub use convert::{convert_file, convert_str, convert_value, ConversionSummary};
pub use document::{load_document, parse_document, yaml_to_json, DocumentFormat};
pub use error::DocumentError;
