//! Bus interfaces: the protocol-typed attachment points on a component.

use crate::modes::InterfaceMode;
use crate::port::PortMapEntry;
use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};

/// A transparent bridge entry naming an initiator interface this
/// target-role interface fans out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparentBridge {
    /// The name of the bridged initiator interface on the same component.
    pub initiator_ref: String,
}

/// A bus interface on a component.
///
/// Binds a set of physical ports (through [`PortMapEntry`] records) to the
/// logical signals of a bus protocol, in a given [`InterfaceMode`]. The
/// optional addressing fields are only meaningful for some modes: base
/// address on initiator-role interfaces, remap address and range on
/// mirrored-target interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusInterface {
    /// The interface name, unique within the owning component.
    pub name: String,
    /// The interface mode.
    pub mode: InterfaceMode,
    /// Reference to the bus definition describing the protocol.
    pub bus_type: Vlnv,
    /// Reference to the abstraction definition used for port mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstraction_ref: Option<Vlnv>,
    /// Logical-to-physical port mappings.
    #[serde(default)]
    pub port_maps: Vec<PortMapEntry>,
    /// Base address (initiator-role interfaces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
    /// Remap address (mirrored-target interfaces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap_address: Option<String>,
    /// Address range (mirrored-target interfaces).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Bridge fan-out entries (target-role interfaces).
    #[serde(default)]
    pub bridges: Vec<TransparentBridge>,
    /// Name of the address space this interface references, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_space_ref: Option<String>,
}

impl BusInterface {
    /// Creates an interface with no port maps or addressing data.
    pub fn new(name: impl Into<String>, mode: InterfaceMode, bus_type: Vlnv) -> Self {
        Self {
            name: name.into(),
            mode,
            bus_type,
            abstraction_ref: None,
            port_maps: Vec::new(),
            base_address: None,
            remap_address: None,
            range: None,
            bridges: Vec::new(),
            address_space_ref: None,
        }
    }

    /// Finds the physical port mapped to a logical signal name.
    pub fn physical_for_logical(&self, logical: &str) -> Option<&str> {
        self.port_maps
            .iter()
            .find(|m| m.logical == logical)
            .map(|m| m.physical.as_str())
    }

    /// Finds the logical signal a physical port is mapped to.
    pub fn logical_for_physical(&self, physical: &str) -> Option<&str> {
        self.port_maps
            .iter()
            .find(|m| m.physical == physical)
            .map(|m| m.logical.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BusInterface {
        let mut bus = BusInterface::new(
            "m_axi",
            InterfaceMode::Initiator,
            Vlnv::new("pulp", "protocol", "axi4", "1.0"),
        );
        bus.port_maps.push(PortMapEntry::new("AWADDR", "m_awaddr", 31, 0));
        bus.port_maps.push(PortMapEntry::new("AWVALID", "m_awvalid", 0, 0));
        bus
    }

    #[test]
    fn physical_lookup() {
        let bus = sample();
        assert_eq!(bus.physical_for_logical("AWADDR"), Some("m_awaddr"));
        assert_eq!(bus.physical_for_logical("BREADY"), None);
    }

    #[test]
    fn logical_lookup() {
        let bus = sample();
        assert_eq!(bus.logical_for_physical("m_awvalid"), Some("AWVALID"));
        assert_eq!(bus.logical_for_physical("nonexistent"), None);
    }

    #[test]
    fn new_interface_is_bare() {
        let bus = sample();
        assert!(bus.bridges.is_empty());
        assert!(bus.base_address.is_none());
        assert!(bus.address_space_ref.is_none());
    }
}
