//! Designs: instance lists and the connections between their interfaces.

use crate::modes::DocRevision;
use crate::vlnv::Vlnv;
use serde::{Deserialize, Serialize};

/// An instantiated component within a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentInstance {
    /// The instance name, unique within the design.
    pub instance_name: String,
    /// The component this instance refers to.
    pub component_ref: Vlnv,
}

/// One end of an interconnection: an interface on a named instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRef {
    /// The component instance name.
    pub instance: String,
    /// The bus interface name on that instance.
    pub bus: String,
}

impl InterfaceRef {
    /// Creates a reference to `bus` on `instance`.
    pub fn new(instance: impl Into<String>, bus: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            bus: bus.into(),
        }
    }
}

/// A connection between bus interfaces in a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interconnection {
    /// A point-to-point connection between two instance interfaces.
    Direct {
        /// The first endpoint.
        a: InterfaceRef,
        /// The second endpoint.
        b: InterfaceRef,
    },
    /// A connection from an instance interface up to an interface on the
    /// design's own boundary.
    Hierarchical {
        /// The instance-side endpoint.
        active: InterfaceRef,
        /// The bus interface name on the encompassing component.
        top_bus: String,
    },
}

/// A design document: instances plus the connections between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    /// The identity of this design.
    pub vlnv: Vlnv,
    /// The specification revision the design is authored against.
    pub revision: DocRevision,
    /// Instantiated components.
    #[serde(default)]
    pub instances: Vec<ComponentInstance>,
    /// Connections between instance interfaces.
    #[serde(default)]
    pub interconnections: Vec<Interconnection>,
}

impl Design {
    /// Creates an empty design.
    pub fn new(vlnv: Vlnv, revision: DocRevision) -> Self {
        Self {
            vlnv,
            revision,
            instances: Vec::new(),
            interconnections: Vec::new(),
        }
    }

    /// Looks up an instance by name.
    pub fn instance(&self, name: &str) -> Option<&ComponentInstance> {
        self.instances.iter().find(|i| i.instance_name == name)
    }

    /// Adds an instance of the given component.
    pub fn add_instance(&mut self, name: impl Into<String>, component_ref: Vlnv) {
        self.instances.push(ComponentInstance {
            instance_name: name.into(),
            component_ref,
        });
    }

    /// Returns `true` if the named interface already participates in any
    /// interconnection.
    pub fn has_connection(&self, instance: &str, bus: &str) -> bool {
        self.interconnections.iter().any(|c| match c {
            Interconnection::Direct { a, b } => {
                (a.instance == instance && a.bus == bus) || (b.instance == instance && b.bus == bus)
            }
            Interconnection::Hierarchical { active, .. } => {
                active.instance == instance && active.bus == bus
            }
        })
    }

    /// Connects two instance interfaces point-to-point.
    pub fn connect(
        &mut self,
        a_instance: impl Into<String>,
        a_bus: impl Into<String>,
        b_instance: impl Into<String>,
        b_bus: impl Into<String>,
    ) {
        self.interconnections.push(Interconnection::Direct {
            a: InterfaceRef::new(a_instance, a_bus),
            b: InterfaceRef::new(b_instance, b_bus),
        });
    }

    /// Connects an instance interface up to the design boundary.
    pub fn connect_hierarchical(
        &mut self,
        instance: impl Into<String>,
        bus: impl Into<String>,
        top_bus: impl Into<String>,
    ) {
        self.interconnections.push(Interconnection::Hierarchical {
            active: InterfaceRef::new(instance, bus),
            top_bus: top_bus.into(),
        });
    }
}
