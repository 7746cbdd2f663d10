//! # Error Types
//!
//! Errors raised while reading, parsing, bridging or writing documents.
//! All variants carry the path (or origin label) of the document involved
//! so a failing run points straight at the offending file.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentFormat;

/// Error loading, converting or writing an API description document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The output file could not be written.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        /// Path of the file that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document text is not valid in its format.
    #[error("invalid {format} in '{origin}': {reason}")]
    Parse {
        /// File path or label of the document source.
        origin: String,
        /// Format the text was parsed as.
        format: DocumentFormat,
        /// Parser message.
        reason: String,
    },

    /// A YAML value has no JSON representation (non-string keys such as
    /// sequences, or non-finite floats).
    #[error("YAML-to-JSON conversion failed: {0}")]
    Conversion(String),

    /// The value could not be serialized to the target format.
    #[error("serialization failed: {0}")]
    Serialize(String),
}
