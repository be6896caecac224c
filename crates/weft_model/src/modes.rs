//! Bus-interface modes and document specification revisions.
//!
//! Interface modes are stored revision-neutrally; the textual rendering
//! depends on the [`DocRevision`] in force. The legacy revision speaks of
//! masters and slaves, the current one of initiators and targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The specification revision a document was authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocRevision {
    /// The legacy revision using master/slave mode vocabulary.
    Std14,
    /// The current revision using initiator/target mode vocabulary.
    Std22,
}

/// The mode of a bus interface, independent of revision vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceMode {
    /// The requesting side of a bus transaction.
    Initiator,
    /// The receiving side of a bus transaction.
    Target,
    /// The mirror of an initiator interface (an attachment point for one).
    MirroredInitiator,
    /// The mirror of a target interface (an attachment point for one).
    MirroredTarget,
}

impl InterfaceMode {
    /// Renders this mode in the given revision's vocabulary.
    pub fn as_str(self, revision: DocRevision) -> &'static str {
        match revision {
            DocRevision::Std14 => match self {
                InterfaceMode::Initiator => "master",
                InterfaceMode::Target => "slave",
                InterfaceMode::MirroredInitiator => "mirroredMaster",
                InterfaceMode::MirroredTarget => "mirroredSlave",
            },
            DocRevision::Std22 => match self {
                InterfaceMode::Initiator => "initiator",
                InterfaceMode::Target => "target",
                InterfaceMode::MirroredInitiator => "mirroredInitiator",
                InterfaceMode::MirroredTarget => "mirroredTarget",
            },
        }
    }

    /// Parses a mode string in either revision's vocabulary.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "master" | "initiator" => Some(InterfaceMode::Initiator),
            "slave" | "target" => Some(InterfaceMode::Target),
            "mirroredMaster" | "mirroredInitiator" => Some(InterfaceMode::MirroredInitiator),
            "mirroredSlave" | "mirroredTarget" => Some(InterfaceMode::MirroredTarget),
            _ => None,
        }
    }

    /// Returns the mirror counterpart of this mode.
    pub fn mirrored(self) -> Self {
        match self {
            InterfaceMode::Initiator => InterfaceMode::MirroredInitiator,
            InterfaceMode::Target => InterfaceMode::MirroredTarget,
            InterfaceMode::MirroredInitiator => InterfaceMode::Initiator,
            InterfaceMode::MirroredTarget => InterfaceMode::Target,
        }
    }
}

impl fmt::Display for InterfaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str(DocRevision::Std22))
    }
}
