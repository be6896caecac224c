//! Address-rule table construction and global window derivation.

use crate::literal::AddrValue;
use serde::{Deserialize, Serialize};

/// Errors raised while building the address map.
#[derive(Debug, thiserror::Error)]
pub enum AddrError {
    /// Two distinct targets declare overlapping concrete regions.
    #[error("address regions of '{a}' and '{b}' overlap")]
    Overlap {
        /// Name of the first target.
        a: String,
        /// Name of the second target.
        b: String,
    },

    /// A region's concrete start lies above its end.
    #[error("address region of '{target}' has start above end")]
    InvalidRegion {
        /// Name of the offending target.
        target: String,
    },
}

/// One address region of a target, with an inclusive end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRegion {
    /// The first address of the region.
    pub start: AddrValue,
    /// The last address of the region (inclusive).
    pub end: AddrValue,
}

impl AddressRegion {
    /// Creates a region from start and inclusive-end values.
    pub fn new(start: AddrValue, end: AddrValue) -> Self {
        Self { start, end }
    }

    /// Parses a region from textual start and end literals.
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: AddrValue::parse(start),
            end: AddrValue::parse(end),
        }
    }

    /// Returns the region size, degrading to expression text when either
    /// bound is symbolic.
    pub fn size(&self) -> AddrValue {
        match (self.start.as_literal(), self.end.as_literal()) {
            (Some(start), Some(end)) => AddrValue::Literal(end - start + 1),
            _ => AddrValue::Symbolic(format!("{} - {} + 1", self.end, self.start)),
        }
    }

    /// Returns the exclusive end, degrading to expression text when the
    /// inclusive end is symbolic.
    pub fn end_exclusive(&self) -> AddrValue {
        match self.end.as_literal() {
            Some(end) => AddrValue::Literal(end + 1),
            None => AddrValue::Symbolic(format!("{} + 1", self.end)),
        }
    }
}

/// One row of the crossbar routing table: start-inclusive, end-exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRule {
    /// The port-array index of the owning target.
    pub index: u32,
    /// The name of the owning target (kept for annotation).
    pub target: String,
    /// The first routed address.
    pub start: AddrValue,
    /// The first address past the routed window.
    pub end: AddrValue,
}

/// The span of all concrete target windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalWindow {
    /// The lowest region start.
    pub lowest_start: u64,
    /// The highest exclusive region end.
    pub highest_end: u64,
}

impl GlobalWindow {
    /// Returns the size of the window.
    pub fn size(&self) -> u64 {
        self.highest_end - self.lowest_start
    }
}

/// Merges per-target address regions into the global routing table.
///
/// Targets are kept in registration order; rules are never sorted by
/// address, so rule positions agree with the port-array indices assigned
/// during endpoint discovery.
#[derive(Debug, Default)]
pub struct AddressAllocator {
    targets: Vec<RegisteredTarget>,
}

#[derive(Debug)]
struct RegisteredTarget {
    index: u32,
    name: String,
    regions: Vec<AddressRegion>,
}

impl AddressAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target's regions under its assigned port-array index.
    pub fn register(&mut self, index: u32, name: impl Into<String>, regions: Vec<AddressRegion>) {
        self.targets.push(RegisteredTarget {
            index,
            name: name.into(),
            regions,
        });
    }

    /// Builds the address-rule table.
    ///
    /// One rule per registered region, in registration order. A region
    /// with a symbolic bound produces a rule with a symbolic exclusive
    /// end; only concrete regions participate in the overlap check, and
    /// overlap between regions of distinct targets is an error.
    pub fn build_rules(&self) -> Result<Vec<AddressRule>, AddrError> {
        let mut rules = Vec::new();
        for target in &self.targets {
            for region in &target.regions {
                if let (Some(start), Some(end)) = (region.start.as_literal(), region.end.as_literal())
                {
                    if start > end {
                        return Err(AddrError::InvalidRegion {
                            target: target.name.clone(),
                        });
                    }
                }
                rules.push(AddressRule {
                    index: target.index,
                    target: target.name.clone(),
                    start: region.start.clone(),
                    end: region.end_exclusive(),
                });
            }
        }
        self.check_overlaps(&rules)?;
        Ok(rules)
    }

    /// Derives the window spanning all concrete regions.
    ///
    /// Returns `None` when no region parses to concrete integers; this is
    /// a valid outcome and synthesis proceeds without a global address
    /// space. Targets without regions contribute nothing.
    pub fn global_window(&self) -> Option<GlobalWindow> {
        let mut lowest_start = u64::MAX;
        let mut highest_end = 0u64;
        for target in &self.targets {
            for region in &target.regions {
                if let (Some(start), Some(end)) = (region.start.as_literal(), region.end.as_literal())
                {
                    lowest_start = lowest_start.min(start);
                    highest_end = highest_end.max(end + 1);
                }
            }
        }
        if lowest_start == u64::MAX || highest_end == 0 {
            return None;
        }
        Some(GlobalWindow {
            lowest_start,
            highest_end,
        })
    }

    fn check_overlaps(&self, rules: &[AddressRule]) -> Result<(), AddrError> {
        for (i, a) in rules.iter().enumerate() {
            let (Some(a_start), Some(a_end)) = (a.start.as_literal(), a.end.as_literal()) else {
                continue;
            };
            for b in rules.iter().skip(i + 1) {
                if a.index == b.index {
                    continue;
                }
                let (Some(b_start), Some(b_end)) = (b.start.as_literal(), b.end.as_literal())
                else {
                    continue;
                };
                if a_start < b_end && b_start < a_end {
                    return Err(AddrError::Overlap {
                        a: a.target.clone(),
                        b: b.target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: u64, end: u64) -> AddressRegion {
        AddressRegion::new(AddrValue::Literal(start), AddrValue::Literal(end))
    }

    #[test]
    fn rule_count_equals_region_count() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "mem", vec![region(0x0, 0xFFF), region(0x2000, 0x2FFF)]);
        alloc.register(1, "uart", vec![region(0x1000, 0x1FFF)]);
        let rules = alloc.build_rules().unwrap();
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn rules_keep_registration_order() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "high", vec![region(0x1000, 0x1FFF)]);
        alloc.register(1, "low", vec![region(0x0, 0xFFF)]);
        let rules = alloc.build_rules().unwrap();
        assert_eq!(rules[0].target, "high");
        assert_eq!(rules[1].target, "low");
        assert_eq!(rules[0].index, 0);
        assert_eq!(rules[1].index, 1);
    }

    #[test]
    fn inclusive_end_becomes_exclusive() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "mem", vec![region(0x0, 0xFFF)]);
        let rules = alloc.build_rules().unwrap();
        assert_eq!(rules[0].start, AddrValue::Literal(0x0));
        assert_eq!(rules[0].end, AddrValue::Literal(0x1000));
    }

    #[test]
    fn symbolic_end_degrades_to_expression() {
        let mut alloc = AddressAllocator::new();
        alloc.register(
            0,
            "mem",
            vec![AddressRegion::parse("0x0", "MEM_END")],
        );
        let rules = alloc.build_rules().unwrap();
        assert_eq!(rules[0].end, AddrValue::Symbolic("MEM_END + 1".into()));
    }

    #[test]
    fn overlap_between_distinct_targets_is_error() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "mem", vec![region(0x0, 0xFFF)]);
        alloc.register(1, "rom", vec![region(0x800, 0x17FF)]);
        assert!(matches!(
            alloc.build_rules(),
            Err(AddrError::Overlap { .. })
        ));
    }

    #[test]
    fn same_target_regions_do_not_trip_overlap_check() {
        // Multi-region targets own all their regions; only cross-target
        // overlap is a routing conflict.
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "mem", vec![region(0x0, 0xFFF), region(0x0, 0x7FF)]);
        assert!(alloc.build_rules().is_ok());
    }

    #[test]
    fn inverted_region_is_error() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "mem", vec![region(0x1000, 0xFFF)]);
        assert!(matches!(
            alloc.build_rules(),
            Err(AddrError::InvalidRegion { .. })
        ));
    }

    #[test]
    fn global_window_spans_all_regions() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "a", vec![region(0x0, 0xFF)]);
        alloc.register(1, "b", vec![region(0x100, 0x1FF)]);
        let window = alloc.global_window().unwrap();
        assert_eq!(window.lowest_start, 0x0);
        assert_eq!(window.highest_end, 0x200);
        assert_eq!(window.size(), 0x200);
    }

    #[test]
    fn no_concrete_region_means_no_window() {
        let mut alloc = AddressAllocator::new();
        alloc.register(
            0,
            "mem",
            vec![AddressRegion::parse("BASE", "BASE + SIZE")],
        );
        assert!(alloc.global_window().is_none());
    }

    #[test]
    fn zero_region_target_contributes_nothing() {
        let mut alloc = AddressAllocator::new();
        alloc.register(0, "bridge", Vec::new());
        alloc.register(1, "mem", vec![region(0x0, 0xFF)]);
        let rules = alloc.build_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].target, "mem");
        let window = alloc.global_window().unwrap();
        assert_eq!(window.size(), 0x100);
    }

    #[test]
    fn region_size_literal_and_symbolic() {
        assert_eq!(region(0x100, 0x1FF).size(), AddrValue::Literal(0x100));
        let sym = AddressRegion::parse("0x0", "LAST");
        assert_eq!(sym.size(), AddrValue::Symbolic("LAST - 'h0 + 1".into()));
    }
}
