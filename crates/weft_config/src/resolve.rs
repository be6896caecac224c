//! Resolution of a raw configuration into typed pipeline inputs.

use crate::error::ConfigError;
use crate::types::{GeneratorConfig, ProtocolFamily, WidthSection};
use weft_addr::AddressRegion;
use weft_model::Vlnv;

/// A target endpoint with parsed address regions.
#[derive(Debug, Clone)]
pub struct ResolvedTarget {
    /// The design instance name.
    pub name: String,
    /// Address regions owned by this target, in declaration order.
    pub regions: Vec<AddressRegion>,
}

/// An initiator endpoint.
#[derive(Debug, Clone)]
pub struct ResolvedInitiator {
    /// The design instance name.
    pub name: String,
}

/// A fully resolved synthesis job: parsed references, ordered endpoints.
#[derive(Debug, Clone)]
pub struct ResolvedJob {
    /// The design to synthesize into.
    pub design: Vlnv,
    /// The identity of the synthesized interconnect component.
    pub component: Vlnv,
    /// The fabric bus definition.
    pub bus: Vlnv,
    /// The clock bus definition, if a clock interface is wanted.
    pub clock: Option<Vlnv>,
    /// The reset bus definition, if a reset interface is wanted.
    pub reset: Option<Vlnv>,
    /// The RTL protocol family.
    pub protocol: ProtocolFamily,
    /// Short protocol tag used in synthesized names.
    pub bus_tag: String,
    /// Shared bridge/channel topology flag.
    pub channel: bool,
    /// Bus signal widths.
    pub widths: WidthSection,
    /// Targets ordered by their effective index.
    pub targets: Vec<ResolvedTarget>,
    /// Initiators ordered by their effective index.
    pub initiators: Vec<ResolvedInitiator>,
    /// Parameters copied onto the synthesized component.
    pub parameters: Vec<(String, String)>,
}

/// Resolves a loaded configuration into a [`ResolvedJob`].
///
/// References are parsed to [`Vlnv`]s, explicit endpoint indices are
/// applied as list order, and address region bounds are parsed into
/// literal-or-symbolic values.
pub fn resolve_job(config: &GeneratorConfig) -> Result<ResolvedJob, ConfigError> {
    let design = parse_ref("interconnect.design", &config.interconnect.design)?;
    let component = parse_ref("interconnect.component", &config.interconnect.component)?;
    let bus = parse_ref("interconnect.bus", &config.interconnect.bus)?;
    let clock = parse_opt_ref("interconnect.clock", config.interconnect.clock.as_deref())?;
    let reset = parse_opt_ref("interconnect.reset", config.interconnect.reset.as_deref())?;

    let bus_tag = config
        .interconnect
        .bus_type
        .clone()
        .unwrap_or_else(|| config.interconnect.protocol.as_str().to_string());

    let mut targets: Vec<(u32, ResolvedTarget)> = config
        .targets
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let regions = entry
                .regions
                .iter()
                .map(|r| AddressRegion::parse(&r.start, &r.end))
                .collect();
            (
                entry.index.unwrap_or(position as u32),
                ResolvedTarget {
                    name: entry.name.clone(),
                    regions,
                },
            )
        })
        .collect();
    targets.sort_by_key(|(index, _)| *index);

    let mut initiators: Vec<(u32, ResolvedInitiator)> = config
        .initiators
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            (
                entry.index.unwrap_or(position as u32),
                ResolvedInitiator {
                    name: entry.name.clone(),
                },
            )
        })
        .collect();
    initiators.sort_by_key(|(index, _)| *index);

    Ok(ResolvedJob {
        design,
        component,
        bus,
        clock,
        reset,
        protocol: config.interconnect.protocol.clone(),
        bus_tag,
        channel: config.interconnect.channel,
        widths: config.widths,
        targets: targets.into_iter().map(|(_, t)| t).collect(),
        initiators: initiators.into_iter().map(|(_, i)| i).collect(),
        parameters: config
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect(),
    })
}

fn parse_ref(field: &str, text: &str) -> Result<Vlnv, ConfigError> {
    Vlnv::parse(text).map_err(|_| ConfigError::InvalidReference {
        field: field.to_string(),
        text: text.to_string(),
    })
}

fn parse_opt_ref(field: &str, text: Option<&str>) -> Result<Option<Vlnv>, ConfigError> {
    match text {
        Some(text) if !text.is_empty() => parse_ref(field, text).map(Some),
        _ => Ok(None),
    }
}
