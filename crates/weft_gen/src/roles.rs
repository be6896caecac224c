//! Revision-aware endpoint role classification.
//!
//! Decides whether an endpoint acts as a bus target or initiator, and
//! which mode the matching interface on the interconnect must declare.
//! Getting this table wrong produces a fabric that drives signals in the
//! wrong direction, so the mapping is kept as one explicit match.

use weft_model::InterfaceMode;

/// The role of an endpoint relative to the fabric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    /// The endpoint receives transactions (is routed to by address).
    Target,
    /// The endpoint issues transactions into the fabric.
    Initiator,
}

/// Returns `true` if a declared mode belongs to the target-like set.
///
/// The set is fixed: target, mirrored-initiator, and their legacy
/// equivalents slave and mirrored-master.
pub fn is_target_like(mode: InterfaceMode) -> bool {
    matches!(
        mode,
        InterfaceMode::Target | InterfaceMode::MirroredInitiator
    )
}

/// Classifies a declared mode into an endpoint role.
pub fn classify(mode: InterfaceMode) -> EndpointRole {
    if is_target_like(mode) {
        EndpointRole::Target
    } else {
        EndpointRole::Initiator
    }
}

/// Selects the mode of the interconnect-side interface for an endpoint.
///
/// Top-level endpoints keep their declared mode; the hierarchical pin
/// forwards the interface unchanged. Non-top endpoints attach to the
/// fabric in the complementary mode, with the mirrored variants selected
/// for the shared bridge/channel topology:
///
/// | endpoint is target | bridge topology | interconnect mode  |
/// |--------------------|-----------------|--------------------|
/// | no                 | no              | target             |
/// | no                 | yes             | mirroredInitiator  |
/// | yes                | no              | initiator          |
/// | yes                | yes             | mirroredTarget     |
pub fn synthesized_mode(declared: InterfaceMode, is_top: bool, is_bridge: bool) -> InterfaceMode {
    if is_top {
        return declared;
    }
    match (is_target_like(declared), is_bridge) {
        (false, false) => InterfaceMode::Target,
        (false, true) => InterfaceMode::MirroredInitiator,
        (true, false) => InterfaceMode::Initiator,
        (true, true) => InterfaceMode::MirroredTarget,
    }
}
