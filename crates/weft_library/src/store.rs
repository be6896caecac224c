//! The library trait and the in-memory implementation.

use crate::error::LibraryError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use weft_model::{
    AbstractionDefinition, Component, Design, Document, DocumentKind, Vlnv,
};

/// The document store the synthesis pipeline reads from and writes to.
///
/// Implementations resolve references to documents and persist the
/// synthesized results. Reads are fail-safe: an unresolvable or corrupt
/// document is simply absent (`None`), and the typed accessors turn that
/// into an explicit [`LibraryError`] for the caller.
pub trait DocumentLibrary {
    /// Resolves a reference to its document, if present.
    fn get(&self, vlnv: &Vlnv) -> Option<Document>;

    /// Returns `true` if the reference resolves to a document.
    fn contains(&self, vlnv: &Vlnv) -> bool;

    /// Adds or replaces a document.
    fn insert(&mut self, document: Document) -> Result<(), LibraryError>;

    /// Removes a document. Returns `true` if one was present.
    fn remove(&mut self, vlnv: &Vlnv) -> bool;

    /// Persists a component into the given directory.
    fn write_component(&mut self, dir: &Path, component: &Component) -> Result<(), LibraryError>;

    /// Persists a design back to its canonical location.
    fn write_design(&mut self, design: &Design) -> Result<(), LibraryError>;

    /// Resolves a reference that must be a component.
    fn component(&self, vlnv: &Vlnv) -> Result<Component, LibraryError> {
        match self.get(vlnv) {
            Some(Document::Component(c)) => Ok(c),
            Some(other) => Err(LibraryError::WrongKind {
                vlnv: vlnv.to_string(),
                expected: DocumentKind::Component,
                found: other.kind(),
            }),
            None => Err(LibraryError::NotFound {
                vlnv: vlnv.to_string(),
            }),
        }
    }

    /// Resolves a reference that must be a design.
    fn design(&self, vlnv: &Vlnv) -> Result<Design, LibraryError> {
        match self.get(vlnv) {
            Some(Document::Design(d)) => Ok(d),
            Some(other) => Err(LibraryError::WrongKind {
                vlnv: vlnv.to_string(),
                expected: DocumentKind::Design,
                found: other.kind(),
            }),
            None => Err(LibraryError::NotFound {
                vlnv: vlnv.to_string(),
            }),
        }
    }

    /// Resolves a reference that must be an abstraction definition.
    fn abstraction(&self, vlnv: &Vlnv) -> Result<AbstractionDefinition, LibraryError> {
        match self.get(vlnv) {
            Some(Document::AbstractionDefinition(a)) => Ok(a),
            Some(other) => Err(LibraryError::WrongKind {
                vlnv: vlnv.to_string(),
                expected: DocumentKind::AbstractionDefinition,
                found: other.kind(),
            }),
            None => Err(LibraryError::NotFound {
                vlnv: vlnv.to_string(),
            }),
        }
    }
}

/// An in-memory document library.
///
/// Used by tests and by callers that assemble their documents
/// programmatically. Persisted components are additionally recorded with
/// their write paths so callers can inspect what a run produced.
#[derive(Debug, Default)]
pub struct MemoryLibrary {
    documents: BTreeMap<Vlnv, Document>,
    written: Vec<(PathBuf, Vlnv)>,
}

impl MemoryLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the (path, reference) pairs of components persisted so far.
    pub fn written(&self) -> &[(PathBuf, Vlnv)] {
        &self.written
    }
}

impl DocumentLibrary for MemoryLibrary {
    fn get(&self, vlnv: &Vlnv) -> Option<Document> {
        self.documents.get(vlnv).cloned()
    }

    fn contains(&self, vlnv: &Vlnv) -> bool {
        self.documents.contains_key(vlnv)
    }

    fn insert(&mut self, document: Document) -> Result<(), LibraryError> {
        self.documents.insert(document.vlnv().clone(), document);
        Ok(())
    }

    fn remove(&mut self, vlnv: &Vlnv) -> bool {
        self.documents.remove(vlnv).is_some()
    }

    fn write_component(&mut self, dir: &Path, component: &Component) -> Result<(), LibraryError> {
        self.written
            .push((dir.to_path_buf(), component.vlnv.clone()));
        self.insert(Document::Component(component.clone()))
    }

    fn write_design(&mut self, design: &Design) -> Result<(), LibraryError> {
        self.insert(Document::Design(design.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_model::DocRevision;

    fn cpu_vlnv() -> Vlnv {
        Vlnv::new("tut.fi", "ip", "cpu", "1.0")
    }

    #[test]
    fn insert_get_remove() {
        let mut lib = MemoryLibrary::new();
        let vlnv = cpu_vlnv();
        lib.insert(Document::Component(Component::new(
            vlnv.clone(),
            DocRevision::Std22,
        )))
        .unwrap();
        assert!(lib.contains(&vlnv));
        assert!(lib.get(&vlnv).is_some());
        assert!(lib.remove(&vlnv));
        assert!(!lib.contains(&vlnv));
        assert!(!lib.remove(&vlnv));
    }

    #[test]
    fn component_accessor_checks_kind() {
        let mut lib = MemoryLibrary::new();
        let vlnv = cpu_vlnv();
        lib.insert(Document::Design(Design::new(
            vlnv.clone(),
            DocRevision::Std22,
        )))
        .unwrap();
        assert!(matches!(
            lib.component(&vlnv),
            Err(LibraryError::WrongKind { .. })
        ));
        assert!(matches!(
            lib.component(&Vlnv::new("no", "such", "doc", "1.0")),
            Err(LibraryError::NotFound { .. })
        ));
    }

    #[test]
    fn write_component_records_path() {
        let mut lib = MemoryLibrary::new();
        let comp = Component::new(cpu_vlnv(), DocRevision::Std22);
        lib.write_component(Path::new("/out/tut.fi/ip/cpu/1.0"), &comp)
            .unwrap();
        assert_eq!(lib.written().len(), 1);
        assert!(lib.contains(&comp.vlnv));
    }
}
