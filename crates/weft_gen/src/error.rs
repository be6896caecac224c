//! Error types for the synthesis pipeline.

/// Errors that abort a synthesis run.
///
/// Expected domain conditions (unparseable literals, unsupported protocol
/// families, missing logical-to-physical mappings) are not errors; they
/// degrade per stage and at most produce reporter messages.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A referenced document could not be resolved.
    #[error(transparent)]
    Library(#[from] weft_library::LibraryError),

    /// The address map could not be built.
    #[error(transparent)]
    Address(#[from] weft_addr::AddrError),

    /// The design component does not reference a design document.
    #[error("component {vlnv} does not encompass a design")]
    MissingDesignRef {
        /// The component that was expected to carry a design reference.
        vlnv: String,
    },
}
