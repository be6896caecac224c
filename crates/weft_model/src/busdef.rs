//! Bus definitions: the identity of a bus protocol.

use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};

/// A bus definition document.
///
/// The synthesizer only needs the identity; the signal-level contract
/// lives in the companion [`AbstractionDefinition`](crate::AbstractionDefinition).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusDefinition {
    /// The identity of this bus definition.
    pub vlnv: Vlnv,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BusDefinition {
    /// Creates a bus definition with no description.
    pub fn new(vlnv: Vlnv) -> Self {
        Self {
            vlnv,
            description: None,
        }
    }
}
