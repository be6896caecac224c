//! Error types for configuration loading and resolution.

/// Errors that can occur when loading or resolving a `weft.toml` job.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field did not parse as a four-part document reference.
    #[error("field '{field}' is not a valid VLNV reference: '{text}'")]
    InvalidReference {
        /// The offending field name.
        field: String,
        /// The text that failed to parse.
        text: String,
    },

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
