//! Crossbar RTL emission for the synthesized interconnect.
//!
//! Renders the interconnect component's address map and port list into
//! protocol-specific parameterized SystemVerilog: interface array
//! declarations, the address-rule table, the crossbar configuration,
//! the crossbar instantiation, and the suffix-matched assignment block.
//!
//! An unsupported protocol family is a soft failure: the module skeleton
//! is still written, with a single explanatory comment in place of a body.

#![warn(missing_docs)]

pub mod emitter;
pub mod protocol;

pub use emitter::{ArraySlot, RtlError, RtlJob, RtlWriter};
pub use protocol::{canonical_signals, interface_member, match_signal};
