//! Endpoint discovery over a design's instances and connectivity.

use crate::error::GenError;
use crate::roles::{classify, is_target_like, EndpointRole};
use weft_addr::AddressRegion;
use weft_library::DocumentLibrary;
use weft_model::{Design, InterfaceMode, Vlnv};
use weft_report::Reporter;

/// A bus interface on a design instance that must be wired to the fabric.
///
/// Immutable once classified. The `index` is the monotonically increasing
/// port-array index assigned at discovery; indices are never reused or
/// reordered, so the component model and the emitted RTL agree on array
/// positions.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// The owning instance name (or the design name for top-level endpoints).
    pub instance: String,
    /// The bus interface name on the owning component.
    pub bus_name: String,
    /// The resolved reference of the owning component.
    pub component_ref: Vlnv,
    /// The name of the interface synthesized for this endpoint.
    pub interface_name: String,
    /// The protocol (bus definition) reference of the interface.
    pub bus_type: Vlnv,
    /// The mode declared on the owning component.
    pub declared_mode: InterfaceMode,
    /// The classified fabric role.
    pub role: EndpointRole,
    /// `true` when this endpoint came from the target-side group and may
    /// consume the shared address space.
    pub target_side: bool,
    /// Address regions owned by this endpoint, in declaration order.
    pub regions: Vec<AddressRegion>,
    /// The assigned port-array index.
    pub index: u32,
    /// `true` when the endpoint sits on the design's own boundary.
    pub is_top: bool,
}

impl Endpoint {
    /// Returns the prefix applied to cloned physical ports.
    pub fn prefix(&self) -> String {
        format!("{}_", self.interface_name)
    }
}

/// A caller-curated target-side endpoint.
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// The design instance name.
    pub instance: String,
    /// The bus interface name on that instance.
    pub bus: String,
    /// Address regions owned by this endpoint.
    pub regions: Vec<AddressRegion>,
}

/// A caller-curated initiator-side starting point.
#[derive(Debug, Clone)]
pub struct StartingPointSpec {
    /// The design instance name.
    pub instance: String,
    /// The bus interface name on that instance.
    pub bus: String,
}

/// Walks the design's instances and collects unconnected matching interfaces.
///
/// Every instance except the interconnect's own is resolved through the
/// library; the first of its bus interfaces whose protocol matches `bus`
/// and which is not yet connected becomes an endpoint. Instances that do
/// not resolve are a hard error: a design referencing an unresolvable
/// component cannot be synthesized into.
pub fn discover_endpoints(
    design: &Design,
    library: &dyn DocumentLibrary,
    bus: &Vlnv,
    interconnect_name: &str,
    reporter: &Reporter,
) -> Result<Vec<Endpoint>, GenError> {
    reporter.info("searching for unconnected interfaces");
    let mut endpoints = Vec::new();
    let mut index = 0u32;

    for instance in &design.instances {
        if instance.instance_name == interconnect_name {
            continue;
        }
        let comp = library.component(&instance.component_ref)?;
        for iface in &comp.bus_interfaces {
            if iface.bus_type != *bus {
                continue;
            }
            if design.has_connection(&instance.instance_name, &iface.name) {
                continue;
            }
            reporter.info(format!(
                "unconnected interface {}.{}",
                instance.instance_name, iface.name
            ));
            endpoints.push(Endpoint {
                instance: instance.instance_name.clone(),
                bus_name: iface.name.clone(),
                component_ref: instance.component_ref.clone(),
                interface_name: format!(
                    "{}_{}",
                    instance.instance_name,
                    iface.name.to_uppercase()
                ),
                bus_type: iface.bus_type.clone(),
                declared_mode: iface.mode,
                role: classify(iface.mode),
                target_side: is_target_like(iface.mode),
                regions: Vec::new(),
                index,
                is_top: false,
            });
            index += 1;
            break;
        }
    }
    Ok(endpoints)
}

/// Builds endpoints from caller-curated groups, skipping the connectivity
/// check since the caller has already curated the list.
///
/// The target-side group is processed before the starting side, sharing
/// one monotonic index counter. An instance that does not resolve, or a
/// named interface that does not exist, is reported and skipped.
pub fn endpoints_from_specs(
    design: &Design,
    library: &dyn DocumentLibrary,
    design_component: &Vlnv,
    endpoints: &[EndpointSpec],
    starting_points: &[StartingPointSpec],
    reporter: &Reporter,
) -> Result<Vec<Endpoint>, GenError> {
    reporter.info("processing starting points and endpoints");
    let mut result = Vec::new();
    let mut index = 0u32;

    for spec in endpoints {
        if let Some(endpoint) = endpoint_from_names(
            design,
            library,
            design_component,
            &spec.instance,
            &spec.bus,
            spec.regions.clone(),
            true,
            index,
            reporter,
        ) {
            result.push(endpoint);
            index += 1;
        }
    }
    for spec in starting_points {
        if let Some(endpoint) = endpoint_from_names(
            design,
            library,
            design_component,
            &spec.instance,
            &spec.bus,
            Vec::new(),
            false,
            index,
            reporter,
        ) {
            result.push(endpoint);
            index += 1;
        }
    }
    Ok(result)
}

/// Resolves one curated (instance, bus) pair into an endpoint.
#[allow(clippy::too_many_arguments)]
fn endpoint_from_names(
    design: &Design,
    library: &dyn DocumentLibrary,
    design_component: &Vlnv,
    instance: &str,
    bus: &str,
    regions: Vec<AddressRegion>,
    target_side: bool,
    index: u32,
    reporter: &Reporter,
) -> Option<Endpoint> {
    let is_top = instance == design_component.name;
    let component_ref = match design.instance(instance) {
        Some(inst) => inst.component_ref.clone(),
        None if is_top => design_component.clone(),
        None => {
            reporter.error(format!("unknown instance '{instance}'"));
            return None;
        }
    };
    let comp = match library.component(&component_ref) {
        Ok(comp) => comp,
        Err(e) => {
            reporter.error(format!("cannot resolve '{instance}': {e}"));
            return None;
        }
    };
    let Some(iface) = comp.bus_interface(bus) else {
        reporter.error(format!(
            "instance '{instance}' has no bus interface named '{bus}'"
        ));
        return None;
    };
    Some(Endpoint {
        instance: instance.to_string(),
        bus_name: bus.to_string(),
        component_ref,
        interface_name: format!("{instance}_{bus}"),
        bus_type: iface.bus_type.clone(),
        declared_mode: iface.mode,
        role: classify(iface.mode),
        target_side,
        regions,
        index,
        is_top,
    })
}
