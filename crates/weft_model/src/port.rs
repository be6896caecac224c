//! Physical ports and logical-to-physical port mappings.

use serde::{Deserialize, Serialize};

/// The direction of a physical port on a component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Data flows into the component.
    In,
    /// Data flows out of the component.
    Out,
    /// Bidirectional.
    InOut,
}

impl PortDirection {
    /// Returns the direction a mirrored attachment point must declare.
    ///
    /// `InOut` mirrors to itself.
    pub fn mirrored(self) -> Self {
        match self {
            PortDirection::In => PortDirection::Out,
            PortDirection::Out => PortDirection::In,
            PortDirection::InOut => PortDirection::InOut,
        }
    }

    /// Renders the direction as an HDL keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::In => "input",
            PortDirection::Out => "output",
            PortDirection::InOut => "inout",
        }
    }
}

/// A wire port on a component, with explicit bit bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The port name.
    pub name: String,
    /// The direction of data flow.
    pub direction: PortDirection,
    /// The left (most significant) bit bound.
    pub left_bound: u32,
    /// The right (least significant) bit bound.
    pub right_bound: u32,
    /// Optional default value expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Port {
    /// Creates a wire port with the given bounds and no default value.
    pub fn wire(name: impl Into<String>, direction: PortDirection, left: u32, right: u32) -> Self {
        Self {
            name: name.into(),
            direction,
            left_bound: left,
            right_bound: right,
            default_value: None,
            description: None,
        }
    }

    /// Returns the bit width implied by the bounds.
    pub fn width(&self) -> u32 {
        self.left_bound.abs_diff(self.right_bound) + 1
    }
}

/// One logical-to-physical mapping on a bus interface.
///
/// Derived once per (endpoint, logical port) pair and immutable after that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapEntry {
    /// The protocol-defined logical signal name.
    pub logical: String,
    /// The physical port name on the owning component.
    pub physical: String,
    /// The left physical bit bound.
    pub left: u32,
    /// The right physical bit bound.
    pub right: u32,
}

impl PortMapEntry {
    /// Creates a mapping with the given bounds.
    pub fn new(logical: impl Into<String>, physical: impl Into<String>, left: u32, right: u32) -> Self {
        Self {
            logical: logical.into(),
            physical: physical.into(),
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_mirroring() {
        assert_eq!(PortDirection::In.mirrored(), PortDirection::Out);
        assert_eq!(PortDirection::Out.mirrored(), PortDirection::In);
        assert_eq!(PortDirection::InOut.mirrored(), PortDirection::InOut);
    }

    #[test]
    fn direction_keywords() {
        assert_eq!(PortDirection::In.as_str(), "input");
        assert_eq!(PortDirection::Out.as_str(), "output");
        assert_eq!(PortDirection::InOut.as_str(), "inout");
    }

    #[test]
    fn width_from_bounds() {
        assert_eq!(Port::wire("data", PortDirection::In, 31, 0).width(), 32);
        assert_eq!(Port::wire("valid", PortDirection::In, 0, 0).width(), 1);
    }

    #[test]
    fn port_serde_roundtrip() {
        let p = Port::wire("awaddr", PortDirection::Out, 31, 0);
        let json = serde_json::to_string(&p).unwrap();
        let restored: Port = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, p);
    }
}
