//! Abstraction definitions: the logical port contract of a bus protocol.

use crate::modes::InterfaceMode;
use crate::port::PortDirection;
use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};

/// The presence of a logical port on one side of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePortRole {
    /// The direction of the signal as seen from this side.
    pub direction: PortDirection,
    /// Declared bit width expression, if the protocol fixes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

/// One logical signal declared by an abstraction definition.
///
/// A signal may exist on the initiator side, the target side, or both;
/// real abstraction definitions routinely declare more logical signals
/// than any one interface variant implements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortAbstraction {
    /// The logical signal name.
    pub name: String,
    /// Presence and direction on the initiator side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_initiator: Option<WirePortRole>,
    /// Presence and direction on the target side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_target: Option<WirePortRole>,
    /// Default value driven when the signal is left unconnected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An abstraction definition: the full set of logical signals for a bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractionDefinition {
    /// The identity of this abstraction definition.
    pub vlnv: Vlnv,
    /// The bus definition this abstraction belongs to.
    pub bus_type: Vlnv,
    /// All logical signals, in declaration order.
    pub ports: Vec<PortAbstraction>,
}

impl AbstractionDefinition {
    /// Looks up a logical signal by name.
    pub fn port(&self, name: &str) -> Option<&PortAbstraction> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Returns the names of logical signals present for the given mode,
    /// in declaration order.
    ///
    /// Mirrored modes see the same signal set as the mode they mirror.
    pub fn logical_ports_for_mode(&self, mode: InterfaceMode) -> Vec<&str> {
        self.ports
            .iter()
            .filter(|p| role_for(p, mode).is_some())
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Returns the declared width expression of a signal for a mode, if any.
    pub fn width_for(&self, name: &str, mode: InterfaceMode) -> Option<&str> {
        let port = self.port(name)?;
        role_for(port, mode)?.width.as_deref()
    }

    /// Returns the direction of a signal for a mode.
    ///
    /// Mirrored modes see the inverted direction of the side they mirror.
    pub fn direction_for(&self, name: &str, mode: InterfaceMode) -> Option<PortDirection> {
        let port = self.port(name)?;
        let role = role_for(port, mode)?;
        Some(match mode {
            InterfaceMode::Initiator | InterfaceMode::Target => role.direction,
            InterfaceMode::MirroredInitiator | InterfaceMode::MirroredTarget => {
                role.direction.mirrored()
            }
        })
    }
}

/// Selects the side of a port abstraction a mode reads from.
fn role_for(port: &PortAbstraction, mode: InterfaceMode) -> Option<&WirePortRole> {
    match mode {
        InterfaceMode::Initiator | InterfaceMode::MirroredInitiator => port.on_initiator.as_ref(),
        InterfaceMode::Target | InterfaceMode::MirroredTarget => port.on_target.as_ref(),
    }
}
