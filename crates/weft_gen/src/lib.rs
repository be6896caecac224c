//! The interconnect synthesizer.
//!
//! This crate hosts the synthesis pipeline: revision-aware role
//! classification, endpoint discovery over a design's connectivity,
//! logical-to-physical port-map synthesis, the interconnect component
//! builder, and the orchestrating [`InterconnectGenerator`].
//!
//! One invocation fully resolves one interconnect: the builder value is
//! threaded through the stages by move, the synthesized component is
//! handed to the library store exactly once at the end, and the RTL
//! emitter renders the matching crossbar text.

#![warn(missing_docs)]

pub mod builder;
pub mod discover;
pub mod error;
pub mod generator;
pub mod portmap;
pub mod roles;

pub use builder::{BuiltInterconnect, CreatedInterface, InterconnectBuilder, SyncKind};
pub use discover::{
    discover_endpoints, endpoints_from_specs, Endpoint, EndpointSpec, StartingPointSpec,
};
pub use error::GenError;
pub use generator::InterconnectGenerator;
pub use portmap::{synthesize_port_maps, SynthesizedMaps};
pub use roles::{classify, is_target_like, synthesized_mode, EndpointRole};
