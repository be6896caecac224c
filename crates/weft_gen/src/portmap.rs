//! Logical-to-physical port-map synthesis for one endpoint.

use weft_model::{
    AbstractionDefinition, BusInterface, Component, InterfaceMode, Port, PortMapEntry,
};

/// The port maps and cloned physical ports synthesized for one endpoint.
#[derive(Debug, Default)]
pub struct SynthesizedMaps {
    /// Logical-to-physical entries for the interconnect-side interface.
    pub port_maps: Vec<PortMapEntry>,
    /// Physical ports to add to the interconnect component.
    pub ports: Vec<Port>,
}

/// Synthesizes the port maps and physical ports for one endpoint.
///
/// For each logical port the abstraction declares for `mode`, the
/// connected interface's port map is consulted; a logical port with no
/// physical counterpart is silently skipped. Physical bit bounds come
/// from the abstraction's declared width when it parses to an integer
/// (`w` gives `[w-1:0]`, a literal `1` gives `[0:0]`), else mirror the
/// connected component's port bounds, else default to `[0:0]`. The clone
/// keeps the source direction for top-level endpoints and mirrors it
/// otherwise.
pub fn synthesize_port_maps(
    abs_def: &AbstractionDefinition,
    mode: InterfaceMode,
    source_comp: &Component,
    source_bus: &BusInterface,
    prefix: &str,
    is_top: bool,
) -> SynthesizedMaps {
    let mut maps = SynthesizedMaps::default();

    for logical in abs_def.logical_ports_for_mode(mode) {
        let Some(physical) = source_bus.physical_for_logical(logical) else {
            continue;
        };
        let Some(source_port) = source_comp.port(physical) else {
            continue;
        };

        let (left, right) = match abstraction_bounds(abs_def, logical, mode) {
            Some(bounds) => bounds,
            None => (source_port.left_bound, source_port.right_bound),
        };

        let mut port = source_port.clone();
        port.name = format!("{prefix}{physical}");
        if !is_top {
            port.direction = port.direction.mirrored();
        }
        port.left_bound = left;
        port.right_bound = right;

        maps.port_maps
            .push(PortMapEntry::new(logical, port.name.clone(), left, right));
        maps.ports.push(port);
    }
    maps
}

/// Computes bounds from the abstraction's declared width, if it parses.
fn abstraction_bounds(
    abs_def: &AbstractionDefinition,
    logical: &str,
    mode: InterfaceMode,
) -> Option<(u32, u32)> {
    let width: u32 = abs_def.width_for(logical, mode)?.trim().parse().ok()?;
    if width == 0 {
        return None;
    }
    Some((width - 1, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_model::{
        DocRevision, PortAbstraction, PortDirection, Vlnv, WirePortRole,
    };

    fn abs_def() -> AbstractionDefinition {
        let out_role = |width: &str| {
            Some(WirePortRole {
                direction: PortDirection::Out,
                width: Some(width.to_string()),
            })
        };
        AbstractionDefinition {
            vlnv: Vlnv::new("pulp", "protocol", "axi4.absDef", "1.0"),
            bus_type: Vlnv::new("pulp", "protocol", "axi4", "1.0"),
            ports: vec![
                PortAbstraction {
                    name: "AWADDR".into(),
                    on_initiator: out_role("32"),
                    on_target: None,
                    default_value: None,
                    description: None,
                },
                PortAbstraction {
                    name: "AWVALID".into(),
                    on_initiator: out_role("1"),
                    on_target: None,
                    default_value: None,
                    description: None,
                },
                PortAbstraction {
                    name: "AWUSER".into(),
                    on_initiator: Some(WirePortRole {
                        direction: PortDirection::Out,
                        width: None,
                    }),
                    on_target: None,
                    default_value: None,
                    description: None,
                },
                PortAbstraction {
                    name: "BREADY".into(),
                    on_initiator: out_role("1"),
                    on_target: None,
                    default_value: None,
                    description: None,
                },
            ],
        }
    }

    fn source() -> (Component, BusInterface) {
        let mut comp = Component::new(
            Vlnv::new("tut.fi", "ip", "cpu", "1.0"),
            DocRevision::Std22,
        );
        comp.ports.push(Port::wire("awaddr_o", PortDirection::Out, 31, 0));
        comp.ports.push(Port::wire("awvalid_o", PortDirection::Out, 0, 0));
        comp.ports.push(Port::wire("awuser_o", PortDirection::Out, 3, 0));
        let mut bus = BusInterface::new(
            "m_axi",
            InterfaceMode::Initiator,
            Vlnv::new("pulp", "protocol", "axi4", "1.0"),
        );
        bus.port_maps.push(PortMapEntry::new("AWADDR", "awaddr_o", 31, 0));
        bus.port_maps.push(PortMapEntry::new("AWVALID", "awvalid_o", 0, 0));
        bus.port_maps.push(PortMapEntry::new("AWUSER", "awuser_o", 3, 0));
        (comp, bus)
    }

    #[test]
    fn bounds_come_from_abstraction_width() {
        let (comp, bus) = source();
        let maps = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "cpu0_m_axi_",
            false,
        );
        let awaddr = maps.port_maps.iter().find(|m| m.logical == "AWADDR").unwrap();
        assert_eq!((awaddr.left, awaddr.right), (31, 0));
        let awvalid = maps.port_maps.iter().find(|m| m.logical == "AWVALID").unwrap();
        assert_eq!((awvalid.left, awvalid.right), (0, 0));
    }

    #[test]
    fn missing_width_mirrors_source_bounds() {
        let (comp, bus) = source();
        let maps = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "cpu0_m_axi_",
            false,
        );
        let awuser = maps.port_maps.iter().find(|m| m.logical == "AWUSER").unwrap();
        assert_eq!((awuser.left, awuser.right), (3, 0));
    }

    #[test]
    fn unmapped_logical_port_is_skipped() {
        let (comp, bus) = source();
        let maps = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "cpu0_m_axi_",
            false,
        );
        // BREADY has no physical counterpart on the source interface.
        assert!(maps.port_maps.iter().all(|m| m.logical != "BREADY"));
        assert_eq!(maps.port_maps.len(), 3);
    }

    #[test]
    fn every_lookup_failing_yields_empty_maps() {
        let comp = Component::new(
            Vlnv::new("tut.fi", "ip", "bare", "1.0"),
            DocRevision::Std22,
        );
        let bus = BusInterface::new(
            "m_axi",
            InterfaceMode::Initiator,
            Vlnv::new("pulp", "protocol", "axi4", "1.0"),
        );
        let maps = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "bare0_m_axi_",
            false,
        );
        assert!(maps.port_maps.is_empty());
        assert!(maps.ports.is_empty());
    }

    #[test]
    fn direction_mirrored_unless_top() {
        let (comp, bus) = source();
        let mirrored = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "p_",
            false,
        );
        assert_eq!(mirrored.ports[0].direction, PortDirection::In);

        let kept = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "p_",
            true,
        );
        assert_eq!(kept.ports[0].direction, PortDirection::Out);
    }

    #[test]
    fn cloned_ports_are_prefixed() {
        let (comp, bus) = source();
        let maps = synthesize_port_maps(
            &abs_def(),
            InterfaceMode::Initiator,
            &comp,
            &bus,
            "cpu0_m_axi_",
            false,
        );
        assert_eq!(maps.ports[0].name, "cpu0_m_axi_awaddr_o");
        assert_eq!(maps.port_maps[0].physical, "cpu0_m_axi_awaddr_o");
    }
}
