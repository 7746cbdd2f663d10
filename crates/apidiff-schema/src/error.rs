//! # Error Types
//!
//! Errors raised while extracting, classifying and comparing schemas.
//! Malformed shapes are reported with the offending schema name rather
//! than skipped, so a bad input document never yields a partial report.

use std::path::PathBuf;

use apidiff_core::DocumentError;
use thiserror::Error;

/// Error during schema comparison.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The document does not declare a recognizable Swagger/OpenAPI version
    /// and carries neither `definitions` nor `components`.
    #[error("cannot detect schema dialect of '{origin}'")]
    UnknownDialect {
        /// File path or label of the document.
        origin: String,
    },

    /// A container that must be a mapping is something else.
    #[error("'{context}' is not a mapping")]
    NotAMapping {
        /// Location of the offending value (e.g. `components.schemas`).
        context: String,
    },

    /// A schema entry has an unexpected shape.
    #[error("malformed schema '{name}': {reason}")]
    MalformedEntry {
        /// Schema name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The config file could not be read.
    #[error("cannot read config '{}': {source}", path.display())]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not a valid comparison config.
    #[error("invalid config: {source}")]
    ConfigParse {
        /// YAML parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The report could not be serialized.
    #[error("report serialization failed: {0}")]
    Render(#[from] serde_json::Error),
}
