//! Error types for library resolution and persistence.

use std::path::PathBuf;
use weft_model::DocumentKind;

/// Errors that can occur while resolving or persisting documents.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The referenced document does not exist in the library.
    #[error("document {vlnv} not found in library")]
    NotFound {
        /// The unresolvable reference.
        vlnv: String,
    },

    /// The reference resolved to a document of the wrong kind.
    #[error("document {vlnv} is a {found}, expected a {expected}")]
    WrongKind {
        /// The reference that was resolved.
        vlnv: String,
        /// The kind the caller needed.
        expected: DocumentKind,
        /// The kind actually stored.
        found: DocumentKind,
    },

    /// An I/O error occurred while reading or writing a document file.
    #[error("library I/O error at {path}: {source}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A document could not be serialized.
    #[error("failed to serialize document: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },
}
