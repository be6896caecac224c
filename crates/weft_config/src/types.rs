//! Configuration types deserialized from `weft.toml`.

use serde::{Deserialize, Serialize};

/// The top-level job configuration parsed from `weft.toml`.
///
/// Describes one interconnect synthesis run: the documents involved, the
/// protocol family, bus widths, and the target/initiator endpoints with
/// their address regions.
#[derive(Debug, Deserialize)]
pub struct GeneratorConfig {
    /// The interconnect identity and protocol selection.
    pub interconnect: InterconnectSection,
    /// Bus signal widths.
    #[serde(default)]
    pub widths: WidthSection,
    /// Target-side endpoints (receive transactions, own address regions).
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
    /// Initiator-side endpoints (issue transactions).
    #[serde(default)]
    pub initiators: Vec<InitiatorEntry>,
    /// Parameters copied onto the synthesized component.
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

/// The `[interconnect]` section: identities and protocol selection.
#[derive(Debug, Deserialize)]
pub struct InterconnectSection {
    /// Reference to the design component to synthesize into.
    pub design: String,
    /// Reference the synthesized interconnect component will carry.
    pub component: String,
    /// Reference to the bus definition of the fabric protocol.
    pub bus: String,
    /// Reference to the clock bus definition, if a clock interface is wanted.
    #[serde(default)]
    pub clock: Option<String>,
    /// Reference to the reset bus definition, if a reset interface is wanted.
    #[serde(default)]
    pub reset: Option<String>,
    /// The RTL protocol family to emit.
    pub protocol: ProtocolFamily,
    /// Short protocol tag used in synthesized names; defaults to the
    /// protocol selector.
    #[serde(default)]
    pub bus_type: Option<String>,
    /// Selects the shared bridge/channel topology instead of independent
    /// fan-out.
    #[serde(default)]
    pub channel: bool,
}

/// The `[widths]` section: bus signal widths in bits.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WidthSection {
    /// Address width.
    pub address: u32,
    /// Data width.
    pub data: u32,
    /// Transaction ID width at the initiator-side ports.
    pub id: u32,
    /// User signal width.
    pub user: u32,
}

impl Default for WidthSection {
    fn default() -> Self {
        Self {
            address: 32,
            data: 32,
            id: 4,
            user: 1,
        }
    }
}

/// One target endpoint entry.
#[derive(Debug, Deserialize)]
pub struct TargetEntry {
    /// The design instance name.
    pub name: String,
    /// Explicit port-array index; defaults to list position.
    #[serde(default)]
    pub index: Option<u32>,
    /// Address regions owned by this target.
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// One address region, bounds as address literals or expressions.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionEntry {
    /// The first address of the region.
    pub start: String,
    /// The last address of the region (inclusive).
    pub end: String,
}

/// One initiator endpoint entry.
#[derive(Debug, Deserialize)]
pub struct InitiatorEntry {
    /// The design instance name.
    pub name: String,
    /// Explicit port-array index; defaults to list position.
    #[serde(default)]
    pub index: Option<u32>,
}

/// A component parameter carried onto the synthesized interconnect.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterEntry {
    /// The parameter name.
    pub name: String,
    /// The parameter value expression.
    pub value: String,
}

/// The RTL protocol family selector.
///
/// Unknown selectors are preserved verbatim; the RTL emitter treats them
/// as a soft failure and emits an explanatory comment instead of a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProtocolFamily {
    /// Full split/merge AXI4 crossbar.
    Axi4,
    /// Single-outstanding AXI4-Lite crossbar.
    Axi4Lite,
    /// Low-overhead OBI crossbar.
    Obi,
    /// An unrecognized selector, carried through for diagnostics.
    Other(String),
}

impl ProtocolFamily {
    /// Returns the canonical selector string.
    pub fn as_str(&self) -> &str {
        match self {
            ProtocolFamily::Axi4 => "axi4",
            ProtocolFamily::Axi4Lite => "axi4lite",
            ProtocolFamily::Obi => "obi",
            ProtocolFamily::Other(text) => text.as_str(),
        }
    }
}

impl From<String> for ProtocolFamily {
    fn from(text: String) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "axi4" => ProtocolFamily::Axi4,
            "axi4lite" | "axi4-lite" | "axi4_lite" => ProtocolFamily::Axi4Lite,
            "obi" => ProtocolFamily::Obi,
            _ => ProtocolFamily::Other(text),
        }
    }
}

impl From<ProtocolFamily> for String {
    fn from(family: ProtocolFamily) -> Self {
        family.as_str().to_string()
    }
}

impl std::fmt::Display for ProtocolFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn protocol_family_selectors() {
        assert_eq!(ProtocolFamily::from("axi4".to_string()), ProtocolFamily::Axi4);
        assert_eq!(
            ProtocolFamily::from("AXI4-Lite".to_string()),
            ProtocolFamily::Axi4Lite
        );
        assert_eq!(ProtocolFamily::from("obi".to_string()), ProtocolFamily::Obi);
        assert_eq!(
            ProtocolFamily::from("wishbone".to_string()),
            ProtocolFamily::Other("wishbone".to_string())
        );
    }

    #[test]
    fn default_widths() {
        let toml = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.widths.address, 32);
        assert_eq!(config.widths.data, 32);
        assert_eq!(config.widths.id, 4);
        assert_eq!(config.widths.user, 1);
        assert!(!config.interconnect.channel);
        assert!(config.targets.is_empty());
    }

    #[test]
    fn target_entries_with_regions() {
        let toml = r#"
[interconnect]
design = "tut.fi:flat:soc:1.0"
component = "tut.fi:flat:interconnect:1.0"
bus = "pulp:protocol:axi4:1.0"
protocol = "axi4"

[[targets]]
name = "mem0"
regions = [{ start = "0x0", end = "0xFFF" }]

[[initiators]]
name = "cpu0"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].regions[0].start, "0x0");
        assert_eq!(config.initiators[0].name, "cpu0");
    }
}
