//! Parsing and validation of `weft.toml` synthesis job descriptions.
//!
//! This crate reads the job configuration file and produces a
//! strongly-typed [`GeneratorConfig`], then resolves it into a
//! [`ResolvedJob`] with parsed document references and address regions
//! ready for the synthesis pipeline.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use resolve::{resolve_job, ResolvedInitiator, ResolvedJob, ResolvedTarget};
pub use types::*;
