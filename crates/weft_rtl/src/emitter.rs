//! The protocol-dispatched crossbar RTL writer.

use crate::protocol::{canonical_signals, interface_member, match_signal};
use std::path::{Path, PathBuf};
use weft_addr::{AddrValue, AddressRule};
use weft_config::{ProtocolFamily, WidthSection};
use weft_model::{Component, PortDirection};

/// Errors that can occur while writing the RTL file.
#[derive(Debug, thiserror::Error)]
pub enum RtlError {
    /// An I/O error occurred while reading or writing the output file.
    #[error("RTL output error at {path}: {source}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// One bus interface bound to a crossbar interface-array slot.
#[derive(Debug, Clone)]
pub struct ArraySlot {
    /// The bus interface name on the synthesized component.
    pub interface: String,
    /// The array position, agreeing with the address-rule target indices.
    pub index: u32,
}

/// Everything the emitter needs for one output file.
#[derive(Debug)]
pub struct RtlJob<'a> {
    /// The synthesized interconnect component.
    pub component: &'a Component,
    /// The protocol family to emit.
    pub family: ProtocolFamily,
    /// Bus signal widths.
    pub widths: WidthSection,
    /// The address-rule table, in target registration order.
    pub rules: &'a [AddressRule],
    /// Target-side interfaces, in array order.
    pub targets: Vec<ArraySlot>,
    /// Initiator-side interfaces, in array order.
    pub initiators: Vec<ArraySlot>,
    /// The clock port name, if a clock interface was synthesized.
    pub clock_port: Option<String>,
    /// The reset port name, if a reset interface was synthesized.
    pub reset_port: Option<String>,
}

/// A buffered text writer for one RTL file.
pub struct RtlWriter {
    txt: String,
}

impl RtlWriter {
    fn new() -> Self {
        Self {
            txt: String::with_capacity(8192),
        }
    }

    fn line(&mut self, text: &str) {
        self.txt.push_str(text);
        self.txt.push('\n');
    }

    fn blank(&mut self) {
        self.txt.push('\n');
    }

    /// Renders the complete module: header, body, and terminator.
    pub fn render(job: &RtlJob<'_>) -> String {
        let mut w = RtlWriter::new();
        w.emit_header(job);
        w.emit_body(job);
        w.line("endmodule");
        w.txt
    }

    /// Renders only the body and terminator, for appending to an existing
    /// module header.
    pub fn render_body(job: &RtlJob<'_>) -> String {
        let mut w = RtlWriter::new();
        w.emit_body(job);
        w.line("endmodule");
        w.txt
    }

    /// Writes `<dir>/<component-name>.v`.
    ///
    /// If the file already exists, everything up to and including the
    /// module's port-list closing line (`);`) is kept and the rest is
    /// replaced with the generated body; otherwise the header is rendered
    /// from the component's ports.
    pub fn write_file(dir: &Path, job: &RtlJob<'_>) -> Result<PathBuf, RtlError> {
        std::fs::create_dir_all(dir).map_err(|e| RtlError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = dir.join(format!("{}.v", job.component.vlnv.name));

        let text = match read_existing_header(&path) {
            Some(header) => format!("{header}{}", RtlWriter::render_body(job)),
            None => RtlWriter::render(job),
        };

        std::fs::write(&path, text).map_err(|e| RtlError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    fn emit_header(&mut self, job: &RtlJob<'_>) {
        let name = &job.component.vlnv.name;
        if job.component.ports.is_empty() {
            self.line(&format!("module {name} ("));
            self.line(");");
            return;
        }
        self.line(&format!("module {name} ("));
        let count = job.component.ports.len();
        for (i, port) in job.component.ports.iter().enumerate() {
            let range = if port.left_bound == port.right_bound {
                String::new()
            } else {
                format!("[{}:{}] ", port.left_bound, port.right_bound)
            };
            let comma = if i + 1 == count { "" } else { "," };
            self.line(&format!(
                "  {:<6} logic {}{}{}",
                port.direction.as_str(),
                range,
                port.name,
                comma
            ));
        }
        self.line(");");
    }

    fn emit_body(&mut self, job: &RtlJob<'_>) {
        self.blank();
        match &job.family {
            ProtocolFamily::Axi4 => self.emit_axi4(job),
            ProtocolFamily::Axi4Lite => self.emit_axi4_lite(job),
            ProtocolFamily::Obi => self.emit_obi(job),
            ProtocolFamily::Other(selector) => {
                self.line(&format!(
                    "  // Unsupported protocol family '{selector}': no crossbar body generated."
                ));
                self.blank();
            }
        }
    }

    fn emit_axi4(&mut self, job: &RtlJob<'_>) {
        let w = job.widths;
        self.line(&format!(
            "  localparam int unsigned NumTargets     = {};",
            job.targets.len()
        ));
        self.line(&format!(
            "  localparam int unsigned NumInitiators  = {};",
            job.initiators.len()
        ));
        self.line(&format!(
            "  localparam int unsigned IdWidth        = {};",
            w.id
        ));
        self.line("  localparam int unsigned IdWidthTargets = IdWidth + $clog2(NumTargets);");
        self.line(&format!(
            "  localparam int unsigned NumAddrRules   = {};",
            job.rules.len()
        ));
        self.blank();

        if !job.initiators.is_empty() {
            self.line("  AXI_BUS #(");
            self.line(&format!("    .AXI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .AXI_DATA_WIDTH ( {} ),", w.data));
            self.line("    .AXI_ID_WIDTH   ( IdWidth ),");
            self.line(&format!("    .AXI_USER_WIDTH ( {} )", w.user));
            self.line("  ) initiator_bus [NumInitiators-1:0] ();");
            self.blank();
        }
        if !job.targets.is_empty() {
            self.line("  AXI_BUS #(");
            self.line(&format!("    .AXI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .AXI_DATA_WIDTH ( {} ),", w.data));
            self.line("    .AXI_ID_WIDTH   ( IdWidthTargets ),");
            self.line(&format!("    .AXI_USER_WIDTH ( {} )", w.user));
            self.line("  ) target_bus [NumTargets-1:0] ();");
            self.blank();
        }

        self.line("  typedef axi_pkg::xbar_rule_32_t rule_t;");
        self.blank();
        self.emit_addr_map(job);

        self.line("  localparam axi_pkg::xbar_cfg_t XbarCfg = '{");
        self.line("    NoSlvPorts:         NumInitiators,");
        self.line("    NoMstPorts:         NumTargets,");
        self.line("    MaxMstTrans:        8,");
        self.line("    MaxSlvTrans:        8,");
        self.line("    FallThrough:        1'b0,");
        self.line("    LatencyMode:        axi_pkg::CUT_ALL_AX,");
        self.line("    PipelineStages:     32'd1,");
        self.line("    AxiIdWidthSlvPorts: IdWidth,");
        self.line("    AxiIdUsedSlvPorts:  IdWidth,");
        self.line("    UniqueIds:          1'b0,");
        self.line(&format!("    AxiAddrWidth:       32'd{},", w.address));
        self.line(&format!("    AxiDataWidth:       32'd{},", w.data));
        self.line("    NoAddrRules:        NumAddrRules");
        self.line("  };");
        self.blank();

        self.line("  axi_xbar_intf #(");
        self.line(&format!("    .AXI_USER_WIDTH ( {} ),", w.user));
        self.line("    .Cfg            ( XbarCfg ),");
        self.line("    .rule_t         ( rule_t )");
        self.line("  ) i_xbar (");
        self.line(&format!("    .clk_i                 ( {} ),", clock_name(job)));
        self.line(&format!("    .rst_ni                ( {} ),", reset_name(job)));
        self.line("    .test_i                ( 1'b0 ),");
        self.line("    .slv_ports             ( initiator_bus ),");
        self.line("    .mst_ports             ( target_bus ),");
        self.line(&format!("    .addr_map_i            ( {} ),", addr_map_binding(job)));
        self.line("    .en_default_mst_port_i ( '0 ),");
        self.line("    .default_mst_port_i    ( '0 )");
        self.line("  );");
        self.blank();

        self.emit_assignments(job);
    }

    fn emit_axi4_lite(&mut self, job: &RtlJob<'_>) {
        let w = job.widths;
        self.line(&format!(
            "  localparam int unsigned NumTargets    = {};",
            job.targets.len()
        ));
        self.line(&format!(
            "  localparam int unsigned NumInitiators = {};",
            job.initiators.len()
        ));
        self.line(&format!(
            "  localparam int unsigned NumAddrRules  = {};",
            job.rules.len()
        ));
        self.blank();

        if !job.initiators.is_empty() {
            self.line("  AXI_LITE #(");
            self.line(&format!("    .AXI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .AXI_DATA_WIDTH ( {} )", w.data));
            self.line("  ) initiator_bus [NumInitiators-1:0] ();");
            self.blank();
        }
        if !job.targets.is_empty() {
            self.line("  AXI_LITE #(");
            self.line(&format!("    .AXI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .AXI_DATA_WIDTH ( {} )", w.data));
            self.line("  ) target_bus [NumTargets-1:0] ();");
            self.blank();
        }

        self.line("  typedef axi_pkg::xbar_rule_32_t rule_t;");
        self.blank();
        self.emit_addr_map(job);

        self.line("  localparam axi_pkg::xbar_cfg_t XbarCfg = '{");
        self.line("    NoSlvPorts:         NumInitiators,");
        self.line("    NoMstPorts:         NumTargets,");
        self.line("    MaxMstTrans:        8,");
        self.line("    MaxSlvTrans:        8,");
        self.line("    FallThrough:        1'b0,");
        self.line("    LatencyMode:        axi_pkg::CUT_ALL_AX,");
        self.line("    PipelineStages:     32'd1,");
        self.line("    AxiIdWidthSlvPorts: 32'd0,");
        self.line("    AxiIdUsedSlvPorts:  32'd0,");
        self.line("    UniqueIds:          1'b0,");
        self.line(&format!("    AxiAddrWidth:       32'd{},", w.address));
        self.line(&format!("    AxiDataWidth:       32'd{},", w.data));
        self.line("    NoAddrRules:        NumAddrRules");
        self.line("  };");
        self.blank();

        self.line("  axi_lite_xbar_intf #(");
        self.line("    .Cfg    ( XbarCfg ),");
        self.line("    .rule_t ( rule_t )");
        self.line("  ) i_xbar (");
        self.line(&format!("    .clk_i                 ( {} ),", clock_name(job)));
        self.line(&format!("    .rst_ni                ( {} ),", reset_name(job)));
        self.line("    .test_i                ( 1'b0 ),");
        self.line("    .slv_ports             ( initiator_bus ),");
        self.line("    .mst_ports             ( target_bus ),");
        self.line(&format!("    .addr_map_i            ( {} ),", addr_map_binding(job)));
        self.line("    .en_default_mst_port_i ( '0 ),");
        self.line("    .default_mst_port_i    ( '0 )");
        self.line("  );");
        self.blank();

        self.emit_assignments(job);
    }

    fn emit_obi(&mut self, job: &RtlJob<'_>) {
        let w = job.widths;
        let managers = if job.initiators.len() == 1 {
            // TODO: drop the spare manager slot once single-manager
            // elaboration in obi_xbar is fixed upstream.
            2
        } else {
            job.initiators.len()
        };
        self.line(&format!(
            "  localparam int unsigned NumManagers     = {managers};"
        ));
        self.line(&format!(
            "  localparam int unsigned NumSubordinates = {};",
            job.targets.len()
        ));
        self.line(&format!(
            "  localparam int unsigned NumAddrRules    = {};",
            job.rules.len()
        ));
        self.blank();

        if !job.initiators.is_empty() {
            self.line("  OBI_BUS #(");
            self.line(&format!("    .OBI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .OBI_DATA_WIDTH ( {} )", w.data));
            self.line("  ) initiator_bus [NumManagers-1:0] ();");
            self.blank();
        }
        if !job.targets.is_empty() {
            self.line("  OBI_BUS #(");
            self.line(&format!("    .OBI_ADDR_WIDTH ( {} ),", w.address));
            self.line(&format!("    .OBI_DATA_WIDTH ( {} )", w.data));
            self.line("  ) target_bus [NumSubordinates-1:0] ();");
            self.blank();
        }

        self.line("  typedef struct packed {");
        self.line("    int unsigned idx;");
        self.line(&format!("    logic [{}:0] start_addr;", w.address - 1));
        self.line(&format!("    logic [{}:0] end_addr;", w.address - 1));
        self.line("  } rule_t;");
        self.blank();
        self.emit_addr_map(job);

        self.line("  obi_xbar_intf #(");
        self.line("    .NumSbrPorts     ( NumManagers ),");
        self.line("    .NumMgrPorts     ( NumSubordinates ),");
        self.line("    .NumMaxTrans     ( 2 ),");
        self.line("    .NumAddrRules    ( NumAddrRules ),");
        self.line("    .addr_map_rule_t ( rule_t )");
        self.line("  ) i_xbar (");
        self.line(&format!("    .clk_i      ( {} ),", clock_name(job)));
        self.line(&format!("    .rst_ni     ( {} ),", reset_name(job)));
        self.line("    .testmode_i ( 1'b0 ),");
        self.line("    .sbr_ports  ( initiator_bus ),");
        self.line("    .mgr_ports  ( target_bus ),");
        self.line(&format!("    .addr_map_i ( {} )", addr_map_binding(job)));
        self.line("  );");
        self.blank();

        self.emit_assignments(job);
    }

    fn emit_addr_map(&mut self, job: &RtlJob<'_>) {
        if job.rules.is_empty() {
            self.line("  // No address rules: all targets are unmapped.");
            self.blank();
            return;
        }
        self.line("  localparam rule_t [NumAddrRules-1:0] AddrMap = '{");
        let count = job.rules.len();
        for (i, rule) in job.rules.iter().enumerate() {
            let comma = if i + 1 == count { "" } else { "," };
            self.line(&format!(
                "    '{{ idx: 32'd{}, start_addr: {}, end_addr: {} }}{comma} // {}",
                rule.index,
                addr_literal(job.widths.address, &rule.start),
                addr_literal(job.widths.address, &rule.end),
                rule.target
            ));
        }
        self.line("  };");
        self.blank();
    }

    fn emit_assignments(&mut self, job: &RtlJob<'_>) {
        let Some(signals) = canonical_signals(&job.family) else {
            return;
        };
        for (slots, array) in [
            (&job.initiators, "initiator_bus"),
            (&job.targets, "target_bus"),
        ] {
            for slot in slots.iter() {
                let ports = job.component.ports_in_interface(&slot.interface);
                if ports.is_empty() {
                    continue;
                }
                self.line(&format!("  // {}", slot.interface));
                for port in ports {
                    let Some(signal) = match_signal(&port.name, signals) else {
                        continue;
                    };
                    let member = interface_member(&job.family, signal);
                    let slot_ref = format!("{array}[{}].{member}", slot.index);
                    match port.direction {
                        PortDirection::In => {
                            self.line(&format!("  assign {slot_ref} = {};", port.name));
                        }
                        PortDirection::Out => {
                            self.line(&format!("  assign {} = {slot_ref};", port.name));
                        }
                        PortDirection::InOut => {}
                    }
                }
                self.blank();
            }
        }
    }
}

/// Renders an address value as a sized hex literal, or verbatim when symbolic.
fn addr_literal(addr_width: u32, value: &AddrValue) -> String {
    match value {
        AddrValue::Literal(v) => {
            let digits = (addr_width as usize / 4).max(1);
            format!("{addr_width}'h{v:0>digits$X}")
        }
        AddrValue::Symbolic(text) => text.clone(),
    }
}

fn addr_map_binding(job: &RtlJob<'_>) -> &'static str {
    if job.rules.is_empty() {
        "'0"
    } else {
        "AddrMap"
    }
}

fn clock_name<'a>(job: &'a RtlJob<'_>) -> &'a str {
    job.clock_port.as_deref().unwrap_or("clk")
}

fn reset_name<'a>(job: &'a RtlJob<'_>) -> &'a str {
    job.reset_port.as_deref().unwrap_or("rst_n")
}

/// Reads an existing output file and returns its header portion, up to
/// and including the port-list closing line.
fn read_existing_header(path: &Path) -> Option<String> {
    let existing = std::fs::read_to_string(path).ok()?;
    let mut header = String::new();
    for line in existing.lines() {
        header.push_str(line);
        header.push('\n');
        if line.trim() == ");" {
            return Some(header);
        }
    }
    None
}
