//! The in-memory model of the component under synthesis.

use crate::discover::Endpoint;
use crate::portmap::SynthesizedMaps;
use crate::roles::EndpointRole;
use weft_addr::AddrValue;
use weft_model::{
    AbstractionDefinition, AddressSpace, BusInterface, Channel, Component, Design, InterfaceMode,
    Parameter, Port, PortMapEntry, TransparentBridge, Vlnv,
};

/// Clock or reset, the two always-added sideband interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    /// The clock interface.
    Clock,
    /// The reset interface.
    Reset,
}

impl SyncKind {
    /// Returns the interface name prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            SyncKind::Clock => "clk",
            SyncKind::Reset => "rst",
        }
    }
}

/// Book-keeping for one synthesized endpoint interface, consumed by the
/// addressing pass.
#[derive(Debug, Clone)]
pub struct CreatedInterface {
    /// The interface name on the interconnect.
    pub name: String,
    /// The synthesized mode.
    pub mode: InterfaceMode,
    /// The endpoint's window start, if known.
    pub start: Option<AddrValue>,
    /// The endpoint's window size, if known.
    pub range: Option<AddrValue>,
}

/// The finished product of one builder run.
#[derive(Debug)]
pub struct BuiltInterconnect {
    /// The synthesized component.
    pub component: Component,
    /// The design with the interconnect instance and any new connections.
    pub design: Design,
    /// The clock port name carried into RTL emission.
    pub clock_port: Option<String>,
    /// The reset port name carried into RTL emission.
    pub reset_port: Option<String>,
}

/// Builds the synthesized interconnect component step by step.
///
/// One builder value is threaded through a run by the generator:
/// interfaces are added per endpoint in discovery order, the addressing
/// pass configures bridges and base/remap addresses, the clock and reset
/// interfaces are appended last, and channel topologies finish with one
/// grouping pass. The value is consumed by [`finish`](Self::finish).
#[derive(Debug)]
pub struct InterconnectBuilder {
    component: Component,
    design: Design,
    created: Vec<CreatedInterface>,
    global_space: Option<String>,
    clock_interface: Option<String>,
    reset_interface: Option<String>,
    clock_port: Option<String>,
    reset_port: Option<String>,
}

impl InterconnectBuilder {
    /// Creates the component and registers its instance in the design.
    pub fn new(vlnv: Vlnv, mut design: Design, parameters: &[(String, String)]) -> Self {
        let mut component = Component::new(vlnv.clone(), design.revision);
        component.parameters = parameters
            .iter()
            .map(|(name, value)| Parameter {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        design.add_instance(vlnv.name.clone(), vlnv);
        Self {
            component,
            design,
            created: Vec::new(),
            global_space: None,
            clock_interface: None,
            reset_interface: None,
            clock_port: None,
            reset_port: None,
        }
    }

    /// Returns the component under construction.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Returns the design being modified.
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// Returns the global address space name, if one was derived.
    pub fn global_space(&self) -> Option<&str> {
        self.global_space.as_deref()
    }

    /// Adds the derived global address space to the component.
    pub fn add_global_address_space(
        &mut self,
        name: impl Into<String>,
        range: String,
        width: String,
    ) {
        let name = name.into();
        self.component.address_spaces.push(AddressSpace {
            name: name.clone(),
            range,
            width,
        });
        self.global_space = Some(name);
    }

    /// Adds the interface record, port maps, and cloned ports for one
    /// endpoint.
    ///
    /// Target-side endpoints with a target role reference the global
    /// address space when one exists.
    pub fn add_endpoint_interface(
        &mut self,
        endpoint: &Endpoint,
        mode: InterfaceMode,
        abstraction: Vlnv,
        maps: SynthesizedMaps,
    ) {
        let mut iface =
            BusInterface::new(endpoint.interface_name.clone(), mode, endpoint.bus_type.clone());
        iface.abstraction_ref = Some(abstraction);
        iface.port_maps = maps.port_maps;
        if endpoint.target_side && endpoint.role == EndpointRole::Target {
            iface.address_space_ref = self.global_space.clone();
        }
        self.component.bus_interfaces.push(iface);
        self.component.ports.extend(maps.ports);

        let first_region = endpoint.regions.first();
        self.created.push(CreatedInterface {
            name: endpoint.interface_name.clone(),
            mode,
            start: first_region.map(|r| r.start.clone()),
            range: first_region.map(|r| r.size()),
        });
    }

    /// Wires one endpoint to the interconnect in the design.
    ///
    /// Top-level endpoints get a hierarchical interconnection back to the
    /// design boundary; instance endpoints get a point-to-point
    /// interconnection to the new interface.
    pub fn wire_endpoint(&mut self, endpoint: &Endpoint) {
        let interconnect = self.component.vlnv.name.clone();
        if endpoint.is_top {
            self.design.connect_hierarchical(
                interconnect,
                endpoint.interface_name.clone(),
                endpoint.bus_name.clone(),
            );
        } else {
            self.design.connect(
                endpoint.instance.clone(),
                endpoint.bus_name.clone(),
                interconnect,
                endpoint.interface_name.clone(),
            );
        }
    }

    /// Configures bridges and base/remap addresses over all endpoint
    /// interfaces.
    ///
    /// Target-mode interfaces fan out to every initiator-mode interface;
    /// initiator-mode interfaces with a known start get a base address;
    /// mirrored-target interfaces with a known window get remap address
    /// and range.
    pub fn finalize_addressing(&mut self) {
        let initiator_names: Vec<String> = self
            .created
            .iter()
            .filter(|c| c.mode == InterfaceMode::Initiator)
            .map(|c| c.name.clone())
            .collect();

        for created in self.created.clone() {
            let Some(iface) = self.component.bus_interface_mut(&created.name) else {
                continue;
            };
            match created.mode {
                InterfaceMode::Target => {
                    iface.bridges = initiator_names
                        .iter()
                        .map(|name| TransparentBridge {
                            initiator_ref: name.clone(),
                        })
                        .collect();
                }
                InterfaceMode::Initiator => {
                    if let Some(start) = &created.start {
                        iface.base_address = Some(start.to_string());
                    }
                }
                InterfaceMode::MirroredTarget => {
                    if let Some(start) = &created.start {
                        iface.remap_address = Some(start.to_string());
                    }
                    if let Some(range) = &created.range {
                        iface.range = Some(range.to_string());
                    }
                }
                InterfaceMode::MirroredInitiator => {}
            }
        }
    }

    /// Appends the clock or reset interface.
    ///
    /// The interface is named `<kind>_<busdef-stem>` where the stem strips
    /// a trailing `.abs` from the bus definition name. Logical ports are
    /// created as same-named physical ports with abstraction-declared
    /// direction, width, and defaults; the last logical port name is
    /// remembered as the clock/reset signal for RTL emission.
    pub fn add_sync_interface(
        &mut self,
        kind: SyncKind,
        bus: &Vlnv,
        abs_def: &AbstractionDefinition,
    ) {
        let stem = bus.name.strip_suffix(".abs").unwrap_or(&bus.name).to_string();
        let iface_name = format!("{}_{stem}", kind.prefix());
        let bus_type = bus.with_name(stem.clone());
        let abstraction = bus.with_name(format!("{stem}.absDef"));

        let mode = InterfaceMode::Target;
        let mut iface = BusInterface::new(iface_name.clone(), mode, bus_type);
        iface.abstraction_ref = Some(abstraction);

        for logical in abs_def.logical_ports_for_mode(mode) {
            match kind {
                SyncKind::Clock => self.clock_port = Some(logical.to_string()),
                SyncKind::Reset => self.reset_port = Some(logical.to_string()),
            }

            let (left, right) = match abs_def
                .width_for(logical, mode)
                .and_then(|w| w.trim().parse::<u32>().ok())
            {
                Some(width) if width > 0 => (width - 1, 0),
                _ => (0, 0),
            };

            if self.component.port(logical).is_none() {
                let direction = abs_def
                    .direction_for(logical, mode)
                    .unwrap_or(weft_model::PortDirection::In);
                let mut port = Port::wire(logical, direction, left, right);
                if let Some(port_abs) = abs_def.port(logical) {
                    port.default_value = port_abs.default_value.clone();
                    port.description = port_abs.description.clone();
                }
                self.component.ports.push(port);
            }

            iface
                .port_maps
                .push(PortMapEntry::new(logical, logical, left, right));
        }

        self.component.bus_interfaces.push(iface);
        match kind {
            SyncKind::Clock => self.clock_interface = Some(iface_name),
            SyncKind::Reset => self.reset_interface = Some(iface_name),
        }
    }

    /// Groups every non-clock/reset interface into one `channel`.
    pub fn group_channel(&mut self) {
        let interfaces: Vec<String> = self
            .component
            .bus_interfaces
            .iter()
            .map(|b| b.name.clone())
            .filter(|name| {
                Some(name.as_str()) != self.clock_interface.as_deref()
                    && Some(name.as_str()) != self.reset_interface.as_deref()
            })
            .collect();
        self.component.channels.push(Channel {
            name: "channel".to_string(),
            interfaces,
        });
    }

    /// Consumes the builder, yielding the finished component and design.
    pub fn finish(self) -> BuiltInterconnect {
        BuiltInterconnect {
            component: self.component,
            design: self.design,
            clock_port: self.clock_port,
            reset_port: self.reset_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::EndpointRole;
    use weft_addr::AddressRegion;
    use weft_model::{DocRevision, PortAbstraction, PortDirection, WirePortRole};

    fn bus_vlnv() -> Vlnv {
        Vlnv::new("pulp", "protocol", "axi4", "1.0")
    }

    fn endpoint(name: &str, role: EndpointRole, regions: Vec<AddressRegion>) -> Endpoint {
        Endpoint {
            instance: name.to_string(),
            bus_name: "bus".to_string(),
            component_ref: Vlnv::new("tut.fi", "ip", name, "1.0"),
            interface_name: format!("{name}_bus"),
            bus_type: bus_vlnv(),
            declared_mode: InterfaceMode::Target,
            role,
            target_side: role == EndpointRole::Target,
            regions,
            index: 0,
            is_top: false,
        }
    }

    fn builder() -> InterconnectBuilder {
        let design = Design::new(
            Vlnv::new("tut.fi", "flat", "soc.design", "1.0"),
            DocRevision::Std22,
        );
        InterconnectBuilder::new(
            Vlnv::new("tut.fi", "flat", "interconnect", "1.0"),
            design,
            &[("ID_WIDTH".to_string(), "4".to_string())],
        )
    }

    fn region(start: u64, end: u64) -> AddressRegion {
        AddressRegion::new(AddrValue::Literal(start), AddrValue::Literal(end))
    }

    #[test]
    fn new_builder_registers_instance() {
        let b = builder();
        assert!(b.design().instance("interconnect").is_some());
        assert_eq!(b.component().parameters[0].name, "ID_WIDTH");
    }

    #[test]
    fn target_interfaces_bridge_to_every_initiator() {
        let mut b = builder();
        let mem = endpoint("mem0", EndpointRole::Target, vec![region(0x0, 0xFFF)]);
        let cpu = endpoint("cpu0", EndpointRole::Initiator, Vec::new());
        b.add_endpoint_interface(&mem, InterfaceMode::Initiator, bus_vlnv(), Default::default());
        b.add_endpoint_interface(&cpu, InterfaceMode::Target, bus_vlnv(), Default::default());
        b.finalize_addressing();

        let cpu_iface = b.component().bus_interface("cpu0_bus").unwrap();
        assert_eq!(cpu_iface.bridges.len(), 1);
        assert_eq!(cpu_iface.bridges[0].initiator_ref, "mem0_bus");
    }

    #[test]
    fn initiator_mode_interface_gets_base_address() {
        let mut b = builder();
        let mem = endpoint("mem0", EndpointRole::Target, vec![region(0x1000, 0x1FFF)]);
        b.add_endpoint_interface(&mem, InterfaceMode::Initiator, bus_vlnv(), Default::default());
        b.finalize_addressing();

        let iface = b.component().bus_interface("mem0_bus").unwrap();
        assert_eq!(iface.base_address.as_deref(), Some("'h1000"));
        assert!(iface.remap_address.is_none());
    }

    #[test]
    fn mirrored_target_gets_remap_and_range() {
        let mut b = builder();
        let mem = endpoint("mem0", EndpointRole::Target, vec![region(0x1000, 0x1FFF)]);
        b.add_endpoint_interface(&mem, InterfaceMode::MirroredTarget, bus_vlnv(), Default::default());
        b.finalize_addressing();

        let iface = b.component().bus_interface("mem0_bus").unwrap();
        assert_eq!(iface.remap_address.as_deref(), Some("'h1000"));
        assert_eq!(iface.range.as_deref(), Some("'h1000"));
        assert!(iface.base_address.is_none());
    }

    #[test]
    fn address_space_reference_requires_global_space() {
        let mut b = builder();
        let before = endpoint("early", EndpointRole::Target, Vec::new());
        b.add_endpoint_interface(&before, InterfaceMode::Initiator, bus_vlnv(), Default::default());

        b.add_global_address_space("axi4_global_space", "'h0200".to_string(), "32".to_string());
        let after = endpoint("late", EndpointRole::Target, Vec::new());
        b.add_endpoint_interface(&after, InterfaceMode::Initiator, bus_vlnv(), Default::default());

        assert!(b
            .component()
            .bus_interface("early_bus")
            .unwrap()
            .address_space_ref
            .is_none());
        assert_eq!(
            b.component()
                .bus_interface("late_bus")
                .unwrap()
                .address_space_ref
                .as_deref(),
            Some("axi4_global_space")
        );
    }

    #[test]
    fn wiring_instance_and_top_endpoints() {
        let mut b = builder();
        let mut inner = endpoint("mem0", EndpointRole::Target, Vec::new());
        b.wire_endpoint(&inner);
        assert!(b.design().has_connection("mem0", "bus"));

        inner.is_top = true;
        inner.instance = "soc".to_string();
        inner.interface_name = "soc_bus".to_string();
        b.wire_endpoint(&inner);
        assert!(b.design().has_connection("interconnect", "soc_bus"));
    }

    fn clk_abs() -> AbstractionDefinition {
        AbstractionDefinition {
            vlnv: Vlnv::new("pulp", "signal", "clk.absDef", "1.0"),
            bus_type: Vlnv::new("pulp", "signal", "clk", "1.0"),
            ports: vec![PortAbstraction {
                name: "clk".into(),
                on_initiator: None,
                on_target: Some(WirePortRole {
                    direction: PortDirection::In,
                    width: Some("1".into()),
                }),
                default_value: None,
                description: Some("fabric clock".into()),
            }],
        }
    }

    #[test]
    fn sync_interface_strips_abs_suffix_and_maps_ports() {
        let mut b = builder();
        b.add_sync_interface(
            SyncKind::Clock,
            &Vlnv::new("pulp", "signal", "clk.abs", "1.0"),
            &clk_abs(),
        );

        let iface = b.component().bus_interface("clk_clk").unwrap();
        assert_eq!(iface.mode, InterfaceMode::Target);
        assert_eq!(iface.bus_type.name, "clk");
        assert_eq!(iface.abstraction_ref.as_ref().unwrap().name, "clk.absDef");
        assert_eq!(iface.port_maps.len(), 1);
        assert_eq!(iface.port_maps[0].logical, "clk");
        assert_eq!(iface.port_maps[0].physical, "clk");

        let port = b.component().port("clk").unwrap();
        assert_eq!(port.direction, PortDirection::In);
        assert_eq!(port.description.as_deref(), Some("fabric clock"));
    }

    #[test]
    fn channel_grouping_excludes_clock_and_reset() {
        let mut b = builder();
        let mem = endpoint("mem0", EndpointRole::Target, Vec::new());
        b.add_endpoint_interface(&mem, InterfaceMode::MirroredTarget, bus_vlnv(), Default::default());
        b.add_sync_interface(
            SyncKind::Clock,
            &Vlnv::new("pulp", "signal", "clk.abs", "1.0"),
            &clk_abs(),
        );
        b.group_channel();

        let built = b.finish();
        assert_eq!(built.component.channels.len(), 1);
        let channel = &built.component.channels[0];
        assert_eq!(channel.name, "channel");
        assert_eq!(channel.interfaces, vec!["mem0_bus"]);
        assert_eq!(built.clock_port.as_deref(), Some("clk"));
    }
}
