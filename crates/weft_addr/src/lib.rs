//! Address-literal parsing and overlap-free address-map allocation.
//!
//! This crate provides the two pure utilities of the interconnect
//! synthesizer: the [`literal`] module normalizes the mixed-radix address
//! literals found in design descriptions (`'h1000`, `0x1000`, `'b1010`,
//! plain decimal), and the [`alloc`] module merges per-target address
//! regions into a global address-rule table and derives the optional
//! global address window.
//!
//! Address values that do not parse to concrete integers degrade to
//! symbolic expression text instead of failing; see [`AddrValue`].

#![warn(missing_docs)]

pub mod alloc;
pub mod literal;

pub use alloc::{AddrError, AddressAllocator, AddressRegion, AddressRule, GlobalWindow};
pub use literal::{normalize, parse_literal, AddrValue};
