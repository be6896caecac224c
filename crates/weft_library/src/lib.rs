//! The document library: reference resolution and document persistence.
//!
//! The synthesis pipeline only ever talks to the [`DocumentLibrary`]
//! trait: "give me the document for reference X", "persist this
//! component". Two implementations are provided — [`MemoryLibrary`] for
//! tests and embedding, and [`DirLibrary`] backed by JSON files under a
//! root directory.

#![warn(missing_docs)]

pub mod dir;
pub mod error;
pub mod store;

pub use dir::DirLibrary;
pub use error::LibraryError;
pub use store::{DocumentLibrary, MemoryLibrary};
