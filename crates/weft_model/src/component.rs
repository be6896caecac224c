//! Components: the documents that own ports, bus interfaces, and address spaces.

use crate::businterface::BusInterface;
use crate::modes::DocRevision;
use crate::port::Port;
use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};

/// Product hierarchy classification of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hierarchy {
    /// A flat, leaf-level component.
    #[default]
    Flat,
    /// A component containing a sub-design.
    Hierarchical,
}

/// How fixed a component's content is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Firmness {
    /// The component may be regenerated or edited freely.
    #[default]
    Mutable,
    /// The component content is fixed.
    Fixed,
}

/// The implementation domain of a component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Implementation {
    /// A hardware component.
    #[default]
    Hw,
    /// A software component.
    Sw,
}

/// The attribute triple carried by every component document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAttributes {
    /// Product hierarchy classification.
    pub hierarchy: Hierarchy,
    /// Content firmness.
    pub firmness: Firmness,
    /// Implementation domain.
    pub implementation: Implementation,
}

/// A named parameter on a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The parameter value expression.
    pub value: String,
}

/// A logical address space spanning one or more target windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSpace {
    /// The address space name.
    pub name: String,
    /// The addressable range expression.
    pub range: String,
    /// The address width expression.
    pub width: String,
}

/// A channel grouping bus interfaces into one shared bus segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// The channel name.
    pub name: String,
    /// Names of the grouped bus interfaces.
    pub interfaces: Vec<String>,
}

/// A component document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// The identity of this component.
    pub vlnv: Vlnv,
    /// The specification revision the component is authored against.
    pub revision: DocRevision,
    /// Hierarchy/firmness/implementation attributes.
    #[serde(default)]
    pub attributes: ComponentAttributes,
    /// Reference to the design this component encompasses, if hierarchical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_ref: Option<Vlnv>,
    /// Component parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Bus interfaces, in declaration order.
    #[serde(default)]
    pub bus_interfaces: Vec<BusInterface>,
    /// Physical ports, in declaration order.
    #[serde(default)]
    pub ports: Vec<Port>,
    /// Address spaces owned by this component.
    #[serde(default)]
    pub address_spaces: Vec<AddressSpace>,
    /// Channel groupings, if any.
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl Component {
    /// Creates an empty component with default attributes.
    pub fn new(vlnv: Vlnv, revision: DocRevision) -> Self {
        Self {
            vlnv,
            revision,
            attributes: ComponentAttributes::default(),
            design_ref: None,
            parameters: Vec::new(),
            bus_interfaces: Vec::new(),
            ports: Vec::new(),
            address_spaces: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Looks up a bus interface by name.
    pub fn bus_interface(&self, name: &str) -> Option<&BusInterface> {
        self.bus_interfaces.iter().find(|b| b.name == name)
    }

    /// Looks up a bus interface by name, mutably.
    pub fn bus_interface_mut(&mut self, name: &str) -> Option<&mut BusInterface> {
        self.bus_interfaces.iter_mut().find(|b| b.name == name)
    }

    /// Returns the names of all bus interfaces, in declaration order.
    pub fn bus_interface_names(&self) -> Vec<&str> {
        self.bus_interfaces.iter().map(|b| b.name.as_str()).collect()
    }

    /// Looks up a physical port by name.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Returns the ports mapped by the named bus interface, in map order.
    ///
    /// Ports referenced by a map entry but missing from the port list are
    /// skipped.
    pub fn ports_in_interface(&self, bus_name: &str) -> Vec<&Port> {
        let Some(bus) = self.bus_interface(bus_name) else {
            return Vec::new();
        };
        bus.port_maps
            .iter()
            .filter_map(|m| self.port(&m.physical))
            .collect()
    }
}
