//! Canonical signal tables and suffix matching per protocol family.
//!
//! Component ports are matched against the protocol's canonical signal
//! names by a fixed suffix convention; matching is pure data-driven
//! lookup, not dispatch.

use weft_config::ProtocolFamily;

/// Canonical signal names of the full AXI4 protocol.
const AXI4_SIGNALS: &[&str] = &[
    "awid", "awaddr", "awlen", "awsize", "awburst", "awlock", "awcache", "awprot", "awqos",
    "awregion", "awuser", "awvalid", "awready", "wdata", "wstrb", "wlast", "wuser", "wvalid",
    "wready", "bid", "bresp", "buser", "bvalid", "bready", "arid", "araddr", "arlen", "arsize",
    "arburst", "arlock", "arcache", "arprot", "arqos", "arregion", "aruser", "arvalid", "arready",
    "rid", "rdata", "rresp", "rlast", "ruser", "rvalid", "rready",
];

/// Canonical signal names of AXI4-Lite.
const AXI4LITE_SIGNALS: &[&str] = &[
    "awaddr", "awprot", "awvalid", "awready", "wdata", "wstrb", "wvalid", "wready", "bresp",
    "bvalid", "bready", "araddr", "arprot", "arvalid", "arready", "rdata", "rresp", "rvalid",
    "rready",
];

/// Canonical signal names of OBI.
const OBI_SIGNALS: &[&str] = &[
    "req", "gnt", "addr", "we", "be", "wdata", "rvalid", "rready", "rdata", "err",
];

/// Suffix decorations a physical port may carry after the signal name.
const SUFFIX_DECORATIONS: &[&str] = &["", "_in", "_out", "_i", "_o"];

/// Returns the canonical signal table for a protocol family, or `None`
/// for an unsupported selector.
pub fn canonical_signals(family: &ProtocolFamily) -> Option<&'static [&'static str]> {
    match family {
        ProtocolFamily::Axi4 => Some(AXI4_SIGNALS),
        ProtocolFamily::Axi4Lite => Some(AXI4LITE_SIGNALS),
        ProtocolFamily::Obi => Some(OBI_SIGNALS),
        ProtocolFamily::Other(_) => None,
    }
}

/// Matches a physical port name against a canonical signal table.
///
/// A port matches signal `sig` when it ends with `_<sig>`, `_<sig>_in`,
/// `_<sig>_out`, `_<sig>_i`, or `_<sig>_o` (case-insensitive). Longer
/// signal names are tried first so `awaddr` wins over `addr`.
pub fn match_signal(port_name: &str, signals: &[&'static str]) -> Option<&'static str> {
    let lower = port_name.to_ascii_lowercase();
    let mut by_length: Vec<&'static str> = signals.to_vec();
    by_length.sort_by_key(|s| std::cmp::Reverse(s.len()));

    for sig in by_length {
        for decoration in SUFFIX_DECORATIONS {
            let suffix = format!("_{sig}{decoration}");
            if lower.ends_with(&suffix) {
                return Some(sig);
            }
        }
    }
    None
}

/// Returns the crossbar interface-array member name for a canonical signal.
///
/// The AXI families split the channel prefix from the field name
/// (`awaddr` becomes `aw_addr`); OBI members keep the signal name.
pub fn interface_member(family: &ProtocolFamily, signal: &str) -> String {
    match family {
        ProtocolFamily::Axi4 | ProtocolFamily::Axi4Lite => {
            for prefix in ["aw", "ar", "w", "r", "b"] {
                if let Some(rest) = signal.strip_prefix(prefix) {
                    if !rest.is_empty() {
                        return format!("{prefix}_{rest}");
                    }
                }
            }
            signal.to_string()
        }
        ProtocolFamily::Obi | ProtocolFamily::Other(_) => signal.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_forms_all_match() {
        for port in [
            "cpu0_axi_awaddr",
            "cpu0_axi_awaddr_in",
            "cpu0_axi_awaddr_out",
            "cpu0_axi_awaddr_i",
            "cpu0_axi_awaddr_o",
        ] {
            assert_eq!(match_signal(port, AXI4_SIGNALS), Some("awaddr"), "{port}");
        }
    }

    #[test]
    fn longest_signal_wins() {
        // "awaddr" must not be shadowed by "addr"-style candidates.
        assert_eq!(match_signal("m_awaddr", AXI4_SIGNALS), Some("awaddr"));
        assert_eq!(match_signal("mgr_addr_i", OBI_SIGNALS), Some("addr"));
    }

    #[test]
    fn case_insensitive_matching() {
        assert_eq!(match_signal("CPU0_AXI_AWVALID", AXI4_SIGNALS), Some("awvalid"));
    }

    #[test]
    fn unrelated_port_does_not_match() {
        assert_eq!(match_signal("irq_line", AXI4_SIGNALS), None);
        assert_eq!(match_signal("awaddr", AXI4_SIGNALS), None); // no underscore
    }

    #[test]
    fn interface_members_split_axi_channels() {
        let fam = ProtocolFamily::Axi4;
        assert_eq!(interface_member(&fam, "awaddr"), "aw_addr");
        assert_eq!(interface_member(&fam, "arvalid"), "ar_valid");
        assert_eq!(interface_member(&fam, "wdata"), "w_data");
        assert_eq!(interface_member(&fam, "bresp"), "b_resp");
        assert_eq!(interface_member(&fam, "rlast"), "r_last");
    }

    #[test]
    fn obi_members_are_verbatim() {
        let fam = ProtocolFamily::Obi;
        assert_eq!(interface_member(&fam, "gnt"), "gnt");
        assert_eq!(interface_member(&fam, "rvalid"), "rvalid");
    }

    #[test]
    fn unsupported_family_has_no_table() {
        assert!(canonical_signals(&ProtocolFamily::Other("wishbone".into())).is_none());
        assert!(canonical_signals(&ProtocolFamily::Axi4).is_some());
    }
}
