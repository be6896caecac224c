//! Structural model types for IP-XACT-style hardware designs.
//!
//! This crate defines the documents the interconnect synthesizer reads and
//! writes: [`Component`], [`Design`], [`BusDefinition`], and
//! [`AbstractionDefinition`], together with the pieces they are built from
//! (bus interfaces, ports, port maps, address spaces, channels). Documents
//! are identified by [`Vlnv`] references and exchanged with the library
//! store as [`Document`] values.

#![warn(missing_docs)]

pub mod abstraction;
pub mod busdef;
pub mod businterface;
pub mod component;
pub mod design;
pub mod document;
pub mod modes;
pub mod port;
pub mod vlnv;

pub use abstraction::{AbstractionDefinition, PortAbstraction, WirePortRole};
pub use busdef::BusDefinition;
pub use businterface::{BusInterface, TransparentBridge};
pub use component::{
    AddressSpace, Channel, Component, ComponentAttributes, Firmness, Hierarchy, Implementation,
    Parameter,
};
pub use design::{ComponentInstance, Design, InterfaceRef, Interconnection};
pub use document::{Document, DocumentKind};
pub use modes::{DocRevision, InterfaceMode};
pub use port::{Port, PortDirection, PortMapEntry};
pub use vlnv::{Vlnv, VlnvParseError};
